//! Customer directory service.

use async_trait::async_trait;
use bloom::customers::{Customer, CustomerUuid, NewCustomer};
use mockall::automock;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;
use tracing::info;

use crate::domain::customers::errors::CustomersServiceError;

/// Customer directory held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryCustomersService {
    customers: RwLock<FxHashMap<CustomerUuid, Customer>>,
}

impl InMemoryCustomersService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted(mut customers: Vec<Customer>) -> Vec<Customer> {
    customers.sort_by(|a, b| {
        a.buyer_name
            .to_lowercase()
            .cmp(&b.buyer_name.to_lowercase())
            .then_with(|| a.uuid.cmp(&b.uuid))
    });

    customers
}

#[async_trait]
impl CustomersService for InMemoryCustomersService {
    async fn create_customer(
        &self,
        customer: NewCustomer,
    ) -> Result<Customer, CustomersServiceError> {
        if customer.buyer_name.trim().is_empty() {
            return Err(CustomersServiceError::MissingRequiredData("buyer_name"));
        }

        if customer.phone_number.trim().is_empty() {
            return Err(CustomersServiceError::MissingRequiredData("phone_number"));
        }

        let mut customers = self.customers.write().await;

        let duplicate = customers
            .values()
            .any(|existing| existing.phone_number == customer.phone_number);

        if duplicate {
            return Err(CustomersServiceError::AlreadyExists);
        }

        let created = Customer {
            uuid: CustomerUuid::new(),
            buyer_name: customer.buyer_name,
            phone_number: customer.phone_number,
            address: customer.address,
        };

        customers.insert(created.uuid, created.clone());

        info!(customer = %created.uuid, "customer created");

        Ok(created)
    }

    async fn get_customer(
        &self,
        customer: CustomerUuid,
    ) -> Result<Customer, CustomersServiceError> {
        self.customers
            .read()
            .await
            .get(&customer)
            .cloned()
            .ok_or(CustomersServiceError::NotFound)
    }

    async fn search_customers(&self, text: String) -> Result<Vec<Customer>, CustomersServiceError> {
        let customers = self.customers.read().await;

        Ok(sorted(
            customers
                .values()
                .filter(|customer| customer.matches(&text))
                .cloned()
                .collect(),
        ))
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, CustomersServiceError> {
        let customers = self.customers.read().await;

        Ok(sorted(customers.values().cloned().collect()))
    }
}

#[automock]
#[async_trait]
pub trait CustomersService: Send + Sync {
    /// Adds a customer to the directory.
    async fn create_customer(
        &self,
        customer: NewCustomer,
    ) -> Result<Customer, CustomersServiceError>;

    /// Retrieve a single customer.
    async fn get_customer(
        &self,
        customer: CustomerUuid,
    ) -> Result<Customer, CustomersServiceError>;

    /// Customers whose name, phone number or address contain `text`, ignoring case.
    async fn search_customers(&self, text: String) -> Result<Vec<Customer>, CustomersServiceError>;

    /// Every customer, ordered by name.
    async fn list_customers(&self) -> Result<Vec<Customer>, CustomersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::helpers::new_customer;

    use super::*;

    #[tokio::test]
    async fn create_customer_returns_customer_with_fresh_uuid() -> TestResult {
        let service = InMemoryCustomersService::new();

        let created = service
            .create_customer(new_customer("Sari", "081234567890"))
            .await?;

        assert_eq!(created.buyer_name, "Sari");
        assert_eq!(service.get_customer(created.uuid).await?, created);

        Ok(())
    }

    #[tokio::test]
    async fn create_customer_with_blank_name_returns_missing_required_data() {
        let service = InMemoryCustomersService::new();

        let result = service
            .create_customer(new_customer("   ", "081234567890"))
            .await;

        assert!(
            matches!(
                result,
                Err(CustomersServiceError::MissingRequiredData("buyer_name"))
            ),
            "expected MissingRequiredData, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_customer_with_known_phone_returns_already_exists() -> TestResult {
        let service = InMemoryCustomersService::new();

        service
            .create_customer(new_customer("Sari", "081234567890"))
            .await?;

        let result = service
            .create_customer(new_customer("Sari W.", "081234567890"))
            .await;

        assert!(
            matches!(result, Err(CustomersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_unknown_customer_returns_not_found() {
        let service = InMemoryCustomersService::new();

        let result = service.get_customer(CustomerUuid::new()).await;

        assert!(
            matches!(result, Err(CustomersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn search_matches_text_and_list_sorts_by_name() -> TestResult {
        let service = InMemoryCustomersService::new();

        service
            .create_customer(new_customer("budi", "0813"))
            .await?;
        service
            .create_customer(new_customer("Ayu", "0812"))
            .await?;
        service
            .create_customer(new_customer("Citra", "0899"))
            .await?;

        let found = service.search_customers("081".to_string()).await?;
        let all = service.list_customers().await?;

        assert_eq!(
            found.iter().map(|c| c.buyer_name.as_str()).collect::<Vec<_>>(),
            ["Ayu", "budi"]
        );
        assert_eq!(
            all.iter().map(|c| c.buyer_name.as_str()).collect::<Vec<_>>(),
            ["Ayu", "budi", "Citra"]
        );

        Ok(())
    }
}
