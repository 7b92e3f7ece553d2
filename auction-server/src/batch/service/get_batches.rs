use {
    super::Service,
    crate::{
        api::RestError,
        batch::entities,
    },
};

impl Service {
    pub async fn get_batches(&self) -> Result<Vec<entities::Batch>, RestError> {
        Ok(self
            .repo
            .get_batches()
            .await?
            .into_iter()
            .filter(|batch| !batch.deleted)
            .collect())
    }
}
