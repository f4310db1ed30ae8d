// src/services/area_service.rs
//
// Areas are the geographic places category-areas point at.

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{validate_area, Area};
use crate::error::AppResult;
use crate::infrastructure::transliterate;
use crate::repositories::AreaRepository;
use crate::services::views::AreaView;

pub struct AreaService {
    area_repo: Arc<dyn AreaRepository>,
}

impl AreaService {
    pub fn new(area_repo: Arc<dyn AreaRepository>) -> Self {
        Self { area_repo }
    }

    pub fn list(&self) -> AppResult<Vec<AreaView>> {
        Ok(self.area_repo.list_all()?.into_iter().map(Self::view).collect())
    }

    pub fn get(&self, id: Uuid) -> AppResult<Option<AreaView>> {
        Ok(self.area_repo.get_by_id(id)?.map(Self::view))
    }

    pub fn create(&self, name: String) -> AppResult<Area> {
        let area = Area::new(name.trim().to_string());
        validate_area(&area)?;
        self.area_repo.insert(&area)?;

        log::info!("Created area {} ({})", area.id, area.name);
        Ok(area)
    }

    fn view(area: Area) -> AreaView {
        let url_title = transliterate(&area.name);
        AreaView { area, url_title }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::create_test_pool;
    use crate::error::AppError;
    use crate::repositories::SqliteAreaRepository;

    fn service() -> AreaService {
        AreaService::new(Arc::new(SqliteAreaRepository::new(create_test_pool())))
    }

    #[test]
    fn test_create_and_view_slug() {
        let service = service();
        let area = service.create(" Нижний Новгород ".to_string()).unwrap();

        let view = service.get(area.id).unwrap().unwrap();
        assert_eq!(view.area.name, "Нижний Новгород");
        assert_eq!(view.url_title, "nizhniy-novgorod");
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(matches!(
            service().create("   ".to_string()),
            Err(AppError::Domain(_))
        ));
    }

    #[test]
    fn test_list() {
        let service = service();
        service.create("Тула".to_string()).unwrap();
        service.create("Омск".to_string()).unwrap();

        let slugs: Vec<String> = service.list().unwrap().into_iter().map(|v| v.url_title).collect();
        assert_eq!(slugs, vec!["omsk", "tula"]);
    }
}
