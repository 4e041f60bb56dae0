use crate::errors::sdk_error::SdkError;
use crate::http::config::ClientConfig;
use crate::http::http_client::HttpClient;
use crate::models::record::{Record, Value};
use crate::normalize::{extract_many, extract_one};
use log::debug;
use std::fmt;

/// Quantity sent by [add_item][Client::add_item] and [remove_item][Client::remove_item] when none is given.
pub const DEFAULT_ITEM_QUANTITY: u32 = 1;

/// Defines the client itself, every CheddarGetter operation is done through an instance of this struct.
/// Calls are independent of each other, so a client can be shared between tasks.
pub struct Client {
    http: HttpClient,
    username: String,
    product_code: String,
}

impl Client {
    /// Creates a client for `product_code` that authenticates as `username`. Nothing is sent until the first
    /// operation.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        product_code: impl Into<String>,
    ) -> Result<Self, SdkError> {
        Self::with_config(ClientConfig::new(username, password, product_code))
    }

    /// Creates a client from a full [ClientConfig], e.g. to change the base URL or set a timeout.
    pub fn with_config(config: ClientConfig) -> Result<Self, SdkError> {
        Ok(Self {
            http: HttpClient::new(&config)?,
            username: config.username,
            product_code: config.product_code,
        })
    }

    /// Product every operation is scoped to.
    pub fn product_code(&self) -> &str {
        &self.product_code
    }

    /// Returns every plan of the product, each one as a record:
    ///
    /// `[{"name": "Little", "code": "LITTLE", "recurringChargeAmount": "1.00", ...}, ...]`
    pub async fn list_plans(&self) -> Result<Vec<Value>, SdkError> {
        let envelope = self
            .http
            .get(&["plans", "get", "productCode", self.product_code.as_str()])
            .await?;

        Ok(extract_many(envelope, "plans", "plan"))
    }

    /// Returns the requested plan, or an empty list if the service sent no plan back.
    pub async fn get_plan(&self, plan_code: &str) -> Result<Value, SdkError> {
        let envelope = self
            .http
            .get(&[
                "plans",
                "get",
                "productCode",
                self.product_code.as_str(),
                "code",
                plan_code,
            ])
            .await?;

        Ok(extract_one(envelope, "plans", "plan"))
    }

    /// Returns every customer of the product. A product without customers gives an empty list.
    pub async fn list_customers(&self) -> Result<Vec<Value>, SdkError> {
        let result = self
            .http
            .get(&["customers", "get", "productCode", self.product_code.as_str()])
            .await;

        match result {
            Ok(envelope) => Ok(extract_many(envelope, "customers", "customer")),
            Err(SdkError::Remote { message, .. }) if is_no_customers_found(&message) => {
                debug!("Treating \"{message}\" as an empty customer list");
                Ok(Vec::new())
            }

            Err(error) => Err(error),
        }
    }

    /// Returns the requested customer, or an empty list if the service sent no customer back.
    pub async fn get_customer(&self, customer_code: &str) -> Result<Value, SdkError> {
        let envelope = self
            .http
            .get(&self.customer_path("get", customer_code))
            .await?;

        Ok(extract_one(envelope, "customers", "customer"))
    }

    /// Creates a customer. Attributes are forwarded as they are, the service validates them:
    ///
    /// ```no_run
    /// # async fn create(client: &cheddargetter::Client) -> Result<(), cheddargetter::SdkError> {
    /// use cheddargetter::Record;
    ///
    /// let customer = client
    ///     .create_customer(
    ///         &Record::new()
    ///             .with("code", "CUSTOMER-1")
    ///             .with("firstName", "Justin")
    ///             .with("lastName", "Blake")
    ///             .with("email", "justin@example.com")
    ///             .with("subscription", Record::new().with("planCode", "FREE")),
    ///     )
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_customer(&self, attributes: &Record) -> Result<Value, SdkError> {
        let envelope = self
            .http
            .post(
                &["customers", "new", "productCode", self.product_code.as_str()],
                Some(attributes),
            )
            .await?;

        Ok(extract_one(envelope, "customers", "customer"))
    }

    /// Updates the included attributes of a customer. Credit card fields are only needed for paid plans
    /// without a card on file.
    ///
    /// Attributes with a `subscription` entry go to `edit`, which updates both the customer and its
    /// subscription. Without one they go to `edit-customer`, which leaves the subscription alone.
    pub async fn update_customer(
        &self,
        customer_code: &str,
        attributes: &Record,
    ) -> Result<Value, SdkError> {
        let action = if attributes.contains_key("subscription") {
            "edit"
        } else {
            "edit-customer"
        };

        let envelope = self
            .http
            .post(&self.customer_path(action, customer_code), Some(attributes))
            .await?;

        Ok(extract_one(envelope, "customers", "customer"))
    }

    /// Cancels the customer's subscription and returns the updated customer.
    pub async fn cancel_subscription(&self, customer_code: &str) -> Result<Value, SdkError> {
        let envelope = self
            .http
            .post(&self.customer_path("cancel", customer_code), None)
            .await?;

        Ok(extract_one(envelope, "customers", "customer"))
    }

    /// Changes plan or billing information of the customer's subscription.
    pub async fn update_subscription(
        &self,
        customer_code: &str,
        attributes: &Record,
    ) -> Result<Value, SdkError> {
        let envelope = self
            .http
            .post(
                &self.customer_path("edit-subscription", customer_code),
                Some(attributes),
            )
            .await?;

        Ok(extract_one(envelope, "customers", "customer"))
    }

    /// Deletes a customer. The envelope is returned as sent, its shape isn't guaranteed.
    pub async fn delete_customer(&self, customer_code: &str) -> Result<Record, SdkError> {
        self.http
            .post(&self.customer_path("delete", customer_code), None)
            .await
    }

    /// Deletes every customer of the product, without asking. The envelope is returned as sent, its shape
    /// isn't guaranteed.
    pub async fn delete_all_customers(&self) -> Result<Record, SdkError> {
        self.http
            .post(
                &[
                    "customers",
                    "delete-all",
                    "confirm",
                    "1",
                    "productCode",
                    self.product_code.as_str(),
                ],
                None,
            )
            .await
    }

    /// Adds `quantity` (default [DEFAULT_ITEM_QUANTITY]) of an item to the customer's subscription.
    pub async fn add_item(
        &self,
        customer_code: &str,
        item_code: &str,
        quantity: Option<u32>,
    ) -> Result<Value, SdkError> {
        self.change_item_quantity("add-item-quantity", customer_code, item_code, quantity)
            .await
    }

    /// Removes `quantity` (default [DEFAULT_ITEM_QUANTITY]) of an item from the customer's subscription.
    pub async fn remove_item(
        &self,
        customer_code: &str,
        item_code: &str,
        quantity: Option<u32>,
    ) -> Result<Value, SdkError> {
        self.change_item_quantity("remove-item-quantity", customer_code, item_code, quantity)
            .await
    }

    async fn change_item_quantity(
        &self,
        action: &str,
        customer_code: &str,
        item_code: &str,
        quantity: Option<u32>,
    ) -> Result<Value, SdkError> {
        let mut segments = self.customer_path(action, customer_code);
        segments.extend(["itemCode", item_code]);

        let attributes =
            Record::new().with("quantity", quantity.unwrap_or(DEFAULT_ITEM_QUANTITY));

        let envelope = self.http.post(&segments, Some(&attributes)).await?;
        Ok(extract_one(envelope, "customers", "customer"))
    }

    fn customer_path<'a>(&'a self, action: &'a str, customer_code: &'a str) -> Vec<&'a str> {
        vec![
            "customers",
            action,
            "productCode",
            self.product_code.as_str(),
            "code",
            customer_code,
        ]
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Client")
            .field("username", &self.username)
            .field("product_code", &self.product_code)
            .finish_non_exhaustive()
    }
}

// HACK: the service sometimes reports an empty customer list as an error instead of an empty node. Only
// list_customers checks this.
fn is_no_customers_found(message: &str) -> bool {
    message.to_lowercase().contains("no customers found")
}
