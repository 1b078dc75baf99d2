use std::fmt;

use crate::shared::params::QueryPayload;

/// What a cached query holds within a resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QueryScope {
    /// A page of the resource's main list, keyed by the backend payload
    List(QueryPayload),
    /// One entity, keyed by the id or slug it was requested with
    Detail(String),
    /// A derived list (categories, grouped contacts, upcoming events...)
    Custom(&'static str, QueryPayload),
}

/// `[resource, scope]`, compared structurally
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey {
    pub resource: &'static str,
    pub scope: QueryScope,
}

impl QueryKey {
    pub fn list(resource: &'static str, payload: QueryPayload) -> Self {
        Self {
            resource,
            scope: QueryScope::List(payload),
        }
    }

    pub fn detail(resource: &'static str, id: impl Into<String>) -> Self {
        Self {
            resource,
            scope: QueryScope::Detail(id.into()),
        }
    }

    pub fn custom(resource: &'static str, name: &'static str, payload: QueryPayload) -> Self {
        Self {
            resource,
            scope: QueryScope::Custom(name, payload),
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let render = |payload: &QueryPayload| {
            payload
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join("&")
        };
        match &self.scope {
            QueryScope::List(p) => write!(f, "[{}, list?{}]", self.resource, render(p)),
            QueryScope::Detail(id) => write!(f, "[{}, detail/{}]", self.resource, id),
            QueryScope::Custom(name, p) => {
                write!(f, "[{}, {}?{}]", self.resource, name, render(p))
            }
        }
    }
}

/// Selects cache entries to invalidate or remove
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryFilter {
    /// Every entry of a resource
    Resource(&'static str),
    /// Every list and derived list of a resource
    Lists(&'static str),
    /// One entity of a resource
    Detail(&'static str, String),
    Exact(QueryKey),
}

impl QueryFilter {
    pub fn matches(&self, key: &QueryKey) -> bool {
        match self {
            QueryFilter::Resource(resource) => key.resource == *resource,
            QueryFilter::Lists(resource) => {
                key.resource == *resource
                    && matches!(key.scope, QueryScope::List(_) | QueryScope::Custom(..))
            }
            QueryFilter::Detail(resource, id) => {
                key.resource == *resource && key.scope == QueryScope::Detail(id.clone())
            }
            QueryFilter::Exact(exact) => key == exact,
        }
    }
}
