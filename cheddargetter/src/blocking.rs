//! Blocking version of [Client][crate::Client]. Every call blocks the current thread until the service
//! replies or the request fails.
//!
//! It drives its own runtime, so it must not be used from inside an async context.

use crate::errors::sdk_error::SdkError;
use crate::errors::transport_error::TransportError;
use crate::http::config::ClientConfig;
use crate::models::record::{Record, Value};
use tokio::runtime::Runtime;

/// Same operations as the async [Client][crate::Client], see there for what each one does.
#[derive(Debug)]
pub struct Client {
    inner: crate::client::Client,
    rt: Runtime,
}

impl Client {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        product_code: impl Into<String>,
    ) -> Result<Self, SdkError> {
        Self::with_config(ClientConfig::new(username, password, product_code))
    }

    pub fn with_config(config: ClientConfig) -> Result<Self, SdkError> {
        let rt = Runtime::new().or(Err(TransportError::CouldNotCreateRuntime))?;
        let inner = crate::client::Client::with_config(config)?;
        Ok(Self { inner, rt })
    }

    pub fn product_code(&self) -> &str {
        self.inner.product_code()
    }

    pub fn list_plans(&self) -> Result<Vec<Value>, SdkError> {
        self.rt.block_on(self.inner.list_plans())
    }

    pub fn get_plan(&self, plan_code: &str) -> Result<Value, SdkError> {
        self.rt.block_on(self.inner.get_plan(plan_code))
    }

    pub fn list_customers(&self) -> Result<Vec<Value>, SdkError> {
        self.rt.block_on(self.inner.list_customers())
    }

    pub fn get_customer(&self, customer_code: &str) -> Result<Value, SdkError> {
        self.rt.block_on(self.inner.get_customer(customer_code))
    }

    pub fn create_customer(&self, attributes: &Record) -> Result<Value, SdkError> {
        self.rt.block_on(self.inner.create_customer(attributes))
    }

    pub fn update_customer(
        &self,
        customer_code: &str,
        attributes: &Record,
    ) -> Result<Value, SdkError> {
        self.rt
            .block_on(self.inner.update_customer(customer_code, attributes))
    }

    pub fn cancel_subscription(&self, customer_code: &str) -> Result<Value, SdkError> {
        self.rt
            .block_on(self.inner.cancel_subscription(customer_code))
    }

    pub fn update_subscription(
        &self,
        customer_code: &str,
        attributes: &Record,
    ) -> Result<Value, SdkError> {
        self.rt
            .block_on(self.inner.update_subscription(customer_code, attributes))
    }

    pub fn delete_customer(&self, customer_code: &str) -> Result<Record, SdkError> {
        self.rt.block_on(self.inner.delete_customer(customer_code))
    }

    pub fn delete_all_customers(&self) -> Result<Record, SdkError> {
        self.rt.block_on(self.inner.delete_all_customers())
    }

    pub fn add_item(
        &self,
        customer_code: &str,
        item_code: &str,
        quantity: Option<u32>,
    ) -> Result<Value, SdkError> {
        self.rt
            .block_on(self.inner.add_item(customer_code, item_code, quantity))
    }

    pub fn remove_item(
        &self,
        customer_code: &str,
        item_code: &str,
        quantity: Option<u32>,
    ) -> Result<Value, SdkError> {
        self.rt
            .block_on(self.inner.remove_item(customer_code, item_code, quantity))
    }
}
