//! Pond service: create, update and delete pass straight through to the
//! repository.

use std::sync::Arc;

use crate::error::AppResult;
use crate::models::{NewPond, Pond};
use crate::repositories::PondRepository;

#[derive(Clone)]
pub struct PondService {
    repo: Arc<dyn PondRepository>,
}

impl PondService {
    pub fn new(repo: Arc<dyn PondRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, new_pond: NewPond) -> AppResult<Pond> {
        self.repo.create(new_pond).await
    }

    pub async fn update(&self, pond: &Pond) -> AppResult<Pond> {
        self.repo.update(pond).await
    }

    pub async fn delete(&self, pond: &Pond) -> AppResult<()> {
        self.repo.delete(pond).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::repositories::MockPondRepository;

    fn pond(id: i32, farm_id: i32) -> Pond {
        Pond {
            id,
            farm_id,
            name: format!("Pond {}", id),
            slug: format!("pond_{}", id),
        }
    }

    #[tokio::test]
    async fn test_create_success() {
        let mut mock = MockPondRepository::new();
        mock.expect_create()
            .withf(|p| p.farm_id == 1 && p.id.is_none())
            .times(1)
            .returning(|p| {
                Ok(Pond {
                    id: 7,
                    farm_id: p.farm_id,
                    name: p.name,
                    slug: p.slug,
                })
            });

        let created = PondService::new(Arc::new(mock))
            .create(NewPond::new(1, "Pond 7", "pond_7"))
            .await
            .unwrap();
        assert_eq!(created, pond(7, 1));
    }

    #[tokio::test]
    async fn test_create_for_missing_farm() {
        let mut mock = MockPondRepository::new();
        mock.expect_create()
            .times(1)
            .returning(|_| {
                Err(AppError::validation(
                    "farm_id",
                    "Invalid reference from ponds with value '42'",
                ))
            });

        let err = PondService::new(Arc::new(mock))
            .create(NewPond::new(42, "Pond", "pond"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "farm_id"));
    }

    #[tokio::test]
    async fn test_update_moves_pond_to_another_farm() {
        let mut mock = MockPondRepository::new();
        mock.expect_update()
            .withf(|p| p.id == 3 && p.farm_id == 2)
            .times(1)
            .returning(|p| Ok(p.clone()));

        let updated = PondService::new(Arc::new(mock)).update(&pond(3, 2)).await.unwrap();
        assert_eq!(updated.farm_id, 2);
    }

    #[tokio::test]
    async fn test_delete_propagates_not_found() {
        let mut mock = MockPondRepository::new();
        mock.expect_delete()
            .times(1)
            .returning(|p| Err(AppError::not_found("pond", "id", p.id)));

        let err = PondService::new(Arc::new(mock)).delete(&pond(5, 1)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { ref entity, .. } if entity == "pond"));
    }
}
