//! Farm service for business logic operations.
//!
//! Everything except paging is a straight pass-through to the repository;
//! `get_all` owns the string parsing and the empty-page rule.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{Farm, NewFarm};
use crate::repositories::FarmRepository;

const FARMS: &str = "farms";

#[derive(Clone)]
pub struct FarmService {
    repo: Arc<dyn FarmRepository>,
}

impl FarmService {
    pub fn new(repo: Arc<dyn FarmRepository>) -> Self {
        Self { repo }
    }

    /// Gets a farm by id, or `NotFound`.
    pub async fn get(&self, id: i32) -> AppResult<Farm> {
        self.repo.get(id).await
    }

    /// Creates a farm; a taken slug or id yields `Duplicate`.
    pub async fn create(&self, new_farm: NewFarm) -> AppResult<Farm> {
        self.repo.create(new_farm).await
    }

    pub async fn update(&self, farm: &Farm) -> AppResult<Farm> {
        self.repo.update(farm).await
    }

    pub async fn delete(&self, farm: &Farm) -> AppResult<()> {
        self.repo.delete(farm).await
    }

    /// Returns one page of farms.
    ///
    /// `limit` and `offset` arrive as raw strings and must be non-negative
    /// integers; anything else is a `Validation` error and the repository is
    /// not called. An empty page is reported as `NoRecords`.
    pub async fn get_all(&self, limit: &str, offset: &str) -> AppResult<Vec<Farm>> {
        let limit = parse_page_param("limit", limit)?;
        let offset = parse_page_param("offset", offset)?;

        let page = self.repo.get_all(limit, offset).await?;
        if page.is_empty() {
            tracing::debug!(limit, offset, "Farm page is empty");
            return Err(AppError::NoRecords {
                entity: FARMS.to_string(),
            });
        }
        Ok(page)
    }
}

fn parse_page_param(field: &str, raw: &str) -> AppResult<i64> {
    let value = raw.trim().parse::<i64>().map_err(|e| {
        tracing::warn!(field, value = raw, "Rejected pagination parameter");
        AppError::validation(field, format!("'{}' is not a valid integer: {}", raw, e))
    })?;

    if value < 0 {
        tracing::warn!(field, value, "Rejected negative pagination parameter");
        return Err(AppError::validation(field, format!("must not be negative, got {}", value)));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockFarmRepository;
    use mockall::predicate::eq;
    use proptest::prelude::*;

    fn farm(id: i32) -> Farm {
        Farm {
            id,
            name: format!("Farm {}", id),
            slug: format!("farm_{}", id),
        }
    }

    fn service(mock: MockFarmRepository) -> FarmService {
        FarmService::new(Arc::new(mock))
    }

    fn duplicate_slug(slug: &str) -> AppError {
        AppError::Duplicate {
            entity: "farms".to_string(),
            field: "slug".to_string(),
            value: slug.to_string(),
        }
    }

    #[tokio::test]
    async fn test_get_found() {
        let mut mock = MockFarmRepository::new();
        mock.expect_get().with(eq(1)).times(1).returning(|id| Ok(farm(id)));

        let result = service(mock).get(1).await.unwrap();
        assert_eq!(result.id, 1);
        assert_eq!(result.slug, "farm_1");
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let mut mock = MockFarmRepository::new();
        mock.expect_get()
            .with(eq(3))
            .times(1)
            .returning(|id| Err(AppError::not_found("farm", "id", id)));

        let err = service(mock).get(3).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { ref value, .. } if value == "3"));
    }

    #[tokio::test]
    async fn test_create_success() {
        let mut mock = MockFarmRepository::new();
        mock.expect_create()
            .withf(|new_farm| new_farm.slug == "farm_3")
            .times(1)
            .returning(|new_farm| {
                Ok(Farm {
                    id: new_farm.id.unwrap_or(3),
                    name: new_farm.name,
                    slug: new_farm.slug,
                })
            });

        let created = service(mock)
            .create(NewFarm::new("Farm 3", "farm_3").with_id(3))
            .await
            .unwrap();
        assert_eq!(created, farm(3));
    }

    #[tokio::test]
    async fn test_create_duplicate() {
        let mut mock = MockFarmRepository::new();
        mock.expect_create()
            .times(1)
            .returning(|new_farm| Err(duplicate_slug(&new_farm.slug)));

        let err = service(mock)
            .create(NewFarm::new("Farm 1", "farm_1").with_id(1))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Duplicate { ref field, .. } if field == "slug"));
    }

    #[tokio::test]
    async fn test_delete_success() {
        let mut mock = MockFarmRepository::new();
        mock.expect_delete()
            .withf(|f| f.id == 1)
            .times(1)
            .returning(|_| Ok(()));

        assert!(service(mock).delete(&farm(1)).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_missing_farm() {
        let mut mock = MockFarmRepository::new();
        mock.expect_delete()
            .times(1)
            .returning(|f| Err(AppError::not_found("farm", "id", f.id)));

        let err = service(mock).delete(&farm(9)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_success() {
        let mut mock = MockFarmRepository::new();
        mock.expect_update()
            .withf(|f| f.id == 1 && f.name == "Farm 2")
            .times(1)
            .returning(|f| Ok(f.clone()));

        let mut renamed = farm(1);
        renamed.name = "Farm 2".to_string();
        let updated = service(mock).update(&renamed).await.unwrap();
        assert_eq!(updated.name, "Farm 2");
    }

    #[tokio::test]
    async fn test_update_conflicting_slug() {
        let mut mock = MockFarmRepository::new();
        mock.expect_update()
            .times(1)
            .returning(|f| Err(duplicate_slug(&f.slug)));

        let mut conflicting = farm(1);
        conflicting.slug = "farm_2".to_string();
        let err = service(mock).update(&conflicting).await.unwrap_err();
        assert!(matches!(err, AppError::Duplicate { ref value, .. } if value == "farm_2"));
    }

    #[tokio::test]
    async fn test_get_all_returns_page() {
        let mut mock = MockFarmRepository::new();
        mock.expect_get_all()
            .with(eq(2), eq(0))
            .times(1)
            .returning(|_, _| Ok(vec![farm(1), farm(2)]));

        let page = service(mock).get_all("2", "0").await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].id, 1);
    }

    #[tokio::test]
    async fn test_get_all_empty_page_is_no_records() {
        let mut mock = MockFarmRepository::new();
        mock.expect_get_all()
            .with(eq(2), eq(5))
            .times(1)
            .returning(|_, _| Ok(Vec::new()));

        let err = service(mock).get_all("2", "5").await.unwrap_err();
        assert_eq!(err.to_string(), "No farms found");
    }

    #[tokio::test]
    async fn test_get_all_trims_whitespace() {
        let mut mock = MockFarmRepository::new();
        mock.expect_get_all()
            .with(eq(10), eq(20))
            .times(1)
            .returning(|_, _| Ok(vec![farm(21)]));

        assert!(service(mock).get_all(" 10 ", "20\n").await.is_ok());
    }

    #[tokio::test]
    async fn test_get_all_rejects_bad_input_without_repository_call() {
        let cases = [
            ("abc", "0", "limit"),
            ("2", "x", "offset"),
            ("-1", "0", "limit"),
            ("2", "-5", "offset"),
            ("", "0", "limit"),
        ];

        for (limit, offset, expected_field) in cases {
            let mut mock = MockFarmRepository::new();
            mock.expect_get_all().never();

            match service(mock).get_all(limit, offset).await {
                Err(AppError::Validation { field, .. }) => assert_eq!(field, expected_field),
                other => panic!(
                    "Expected Validation error for ({}, {}), got: {:?}",
                    limit, offset, other
                ),
            }
        }
    }

    proptest! {
        #[test]
        fn prop_non_negative_integers_parse(value in 0i64..=i64::MAX) {
            prop_assert_eq!(parse_page_param("limit", &value.to_string()).unwrap(), value);
        }

        #[test]
        fn prop_negative_integers_are_rejected(value in i64::MIN..0i64) {
            let result = parse_page_param("offset", &value.to_string());
            let is_validation = matches!(result, Err(AppError::Validation { .. }));
            prop_assert!(is_validation);
        }

        #[test]
        fn prop_non_numeric_input_is_rejected(raw in "[a-zA-Z_.]{1,12}") {
            let result = parse_page_param("limit", &raw);
            let is_validation = matches!(result, Err(AppError::Validation { .. }));
            prop_assert!(is_validation);
        }
    }
}
