use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::errors::{DomainError, DomainResult};
use crate::storage::ServiceStorage;
use shared::{
    CreateServiceRequest, Service, ServiceListResponse, ServiceResponse, UpdateServiceRequest,
};

/// Service catalog (Servicios): what the company offers, its price and
/// estimated duration
#[derive(Clone)]
pub struct CatalogService {
    storage: Arc<dyn ServiceStorage>,
}

impl CatalogService {
    pub fn new(storage: Arc<dyn ServiceStorage>) -> Self {
        Self { storage }
    }

    pub async fn create_service(&self, request: CreateServiceRequest) -> DomainResult<ServiceResponse> {
        info!("Creating service: {}", request.name);

        let mut service = Service {
            id: 0,
            name: validate_name(&request.name)?,
            description: request.description.trim().to_string(),
            price: validate_price(request.price)?,
            estimated_duration_minutes: validate_duration(request.estimated_duration_minutes)?,
            active: request.active.unwrap_or(true),
        };

        service.id = self.storage.store_service(&service).await?;
        info!("Created service {} ({})", service.id, service.name);

        Ok(ServiceResponse {
            service,
            success_message: "Servicio creado correctamente".to_string(),
        })
    }

    pub async fn get_service(&self, id: i64) -> DomainResult<Service> {
        self.storage
            .get_service(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Service", id))
    }

    pub async fn list_services(&self, active_only: bool) -> DomainResult<ServiceListResponse> {
        info!("Listing services (active_only={})", active_only);
        let services = self.storage.list_services(active_only).await?;
        Ok(ServiceListResponse { services })
    }

    pub async fn update_service(
        &self,
        id: i64,
        request: UpdateServiceRequest,
    ) -> DomainResult<ServiceResponse> {
        info!("Updating service: {}", id);

        let mut service = self.get_service(id).await?;

        if let Some(name) = request.name {
            service.name = validate_name(&name)?;
        }
        if let Some(description) = request.description {
            service.description = description.trim().to_string();
        }
        if let Some(price) = request.price {
            service.price = validate_price(price)?;
        }
        if let Some(duration) = request.estimated_duration_minutes {
            service.estimated_duration_minutes = validate_duration(duration)?;
        }
        if let Some(active) = request.active {
            service.active = active;
        }

        self.storage.update_service(&service).await?;

        Ok(ServiceResponse {
            service,
            success_message: "Servicio actualizado correctamente".to_string(),
        })
    }

    /// Flip the active flag; inactive services stay listed but are not offered
    pub async fn toggle_active(&self, id: i64) -> DomainResult<ServiceResponse> {
        let mut service = self.get_service(id).await?;
        service.active = !service.active;
        self.storage.update_service(&service).await?;

        info!("Service {} is now {}", id, if service.active { "active" } else { "inactive" });

        let success_message = if service.active {
            "Servicio activado"
        } else {
            "Servicio desactivado"
        };
        Ok(ServiceResponse {
            service,
            success_message: success_message.to_string(),
        })
    }

    pub async fn delete_service(&self, id: i64) -> DomainResult<()> {
        info!("Deleting service: {}", id);

        if !self.storage.delete_service(id).await? {
            warn!("Service not found for deletion: {}", id);
            return Err(DomainError::not_found("Service", id));
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> DomainResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::validation("Service name cannot be empty"));
    }
    Ok(name.to_string())
}

fn validate_price(price: f64) -> DomainResult<f64> {
    if !price.is_finite() || price < 0.0 {
        return Err(DomainError::validation("Price must be zero or greater"));
    }
    Ok(price)
}

fn validate_duration(minutes: u32) -> DomainResult<u32> {
    if minutes == 0 {
        return Err(DomainError::validation("Estimated duration must be greater than zero"));
    }
    Ok(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{DbConnection, ServiceRepository};

    async fn setup_test() -> CatalogService {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        CatalogService::new(Arc::new(ServiceRepository::new(db)))
    }

    fn request(name: &str, price: f64, minutes: u32) -> CreateServiceRequest {
        CreateServiceRequest {
            name: name.to_string(),
            description: "Incluye revisión de filtros".to_string(),
            price,
            estimated_duration_minutes: minutes,
            active: None,
        }
    }

    #[tokio::test]
    async fn test_create_service_defaults_to_active() {
        let catalog = setup_test().await;

        let response = catalog
            .create_service(request("  Mantenimiento preventivo ", 950.0, 120))
            .await
            .expect("Failed to create service");

        assert!(response.service.id > 0);
        assert!(response.service.active);
        assert_eq!(response.service.name, "Mantenimiento preventivo");
    }

    #[tokio::test]
    async fn test_create_service_validation() {
        let catalog = setup_test().await;

        assert!(matches!(
            catalog.create_service(request(" ", 100.0, 30)).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            catalog.create_service(request("Revisión", -1.0, 30)).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            catalog.create_service(request("Revisión", 100.0, 0)).await,
            Err(DomainError::Validation(_))
        ));

        // Free services are allowed
        assert!(catalog.create_service(request("Diagnóstico", 0.0, 15)).await.is_ok());
    }

    #[tokio::test]
    async fn test_toggle_and_list_active_only() {
        let catalog = setup_test().await;
        let created = catalog
            .create_service(request("Carga de gas", 700.0, 60))
            .await
            .unwrap()
            .service;
        catalog.create_service(request("Limpieza", 400.0, 45)).await.unwrap();

        let toggled = catalog.toggle_active(created.id).await.unwrap();
        assert!(!toggled.service.active);
        assert_eq!(toggled.success_message, "Servicio desactivado");

        let active = catalog.list_services(true).await.unwrap().services;
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Limpieza");

        let all = catalog.list_services(false).await.unwrap().services;
        assert_eq!(all.len(), 2);

        assert!(catalog.toggle_active(created.id).await.unwrap().service.active);
    }

    #[tokio::test]
    async fn test_update_service_partial() {
        let catalog = setup_test().await;
        let created = catalog
            .create_service(request("Revisión", 300.0, 30))
            .await
            .unwrap()
            .service;

        let updated = catalog
            .update_service(
                created.id,
                UpdateServiceRequest {
                    price: Some(350.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .service;

        assert_eq!(updated.price, 350.0);
        assert_eq!(updated.name, "Revisión");
        assert_eq!(catalog.get_service(created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_delete_missing_service_is_not_found() {
        let catalog = setup_test().await;

        assert!(matches!(
            catalog.delete_service(42).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            catalog.toggle_active(42).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
