//! Sales Report Use Case

use std::sync::Arc;

use crate::domain::entity::sale::SalesDay;
use crate::domain::repository::ItemRepository;
use crate::domain::services::SalesPage;
use crate::error::ItemResult;

pub struct SalesReportUseCase<R>
where
    R: ItemRepository,
{
    repo: Arc<R>,
}

impl<R> SalesReportUseCase<R>
where
    R: ItemRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, offset: Option<i64>, limit: Option<i64>) -> ItemResult<Vec<SalesDay>> {
        let page = SalesPage::new(offset, limit)?;
        self.repo.sales_by_day(page).await
    }
}
