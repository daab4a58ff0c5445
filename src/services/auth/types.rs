/*
 * Responsibility
 * - identity (Account) and authorization subject (Resource) exchanged with Auth
 * - both are built per request and never persisted by the gateway
 */
/// Resource type for everything the gateway protects.
pub const RESOURCE_TYPE_SERVICE: &str = "service";

/// Identity returned by account inspection.
///
/// An empty `id` means "no authenticated identity".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Account {
    pub id: String,
    pub namespace: String,
}

impl Account {
    pub fn new(id: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    /// Placeholder identity used when inspection fails.
    pub fn anonymous(namespace: impl Into<String>) -> Self {
        Self::new(String::new(), namespace)
    }

    pub fn is_anonymous(&self) -> bool {
        self.id.is_empty()
    }
}

/// Subject presented to policy verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub kind: String,
    pub name: String,
    pub endpoint: String,
    pub namespace: String,
}

impl Resource {
    pub fn service(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            kind: RESOURCE_TYPE_SERVICE.to_owned(),
            name: name.into(),
            endpoint: endpoint.into(),
            namespace: namespace.into(),
        }
    }
}
