use std::time::Duration;

use reqwest::header::HeaderMap;
use schemars::JsonSchema;
use secrecy::SecretString;
use serde::Deserialize;
use url::Url;
use work_items_graphql::WorkItemsVariables;
use work_items_graphql::errors::GraphQLError;
use work_items_graphql::graphql::HttpClient;

use crate::logging::Logging;

/// Configuration for the work items client
#[derive(Debug, Deserialize, JsonSchema)]
pub struct Config {
    /// The GraphQL endpoint of the backend, e.g. `https://gitlab.com/api/graphql`
    pub endpoint: Url,

    /// Personal access token, sent as a bearer token
    #[serde(default)]
    #[schemars(with = "Option<String>")]
    pub token: Option<SecretString>,

    /// List of hard-coded headers to include in all GraphQL requests
    #[serde(default, deserialize_with = "parsers::header_map")]
    #[schemars(with = "std::collections::HashMap<String, String>")]
    pub headers: HeaderMap,

    /// Timeout for each request to the endpoint
    #[serde(default = "defaults::timeout", with = "humantime_serde")]
    #[schemars(with = "String")]
    pub timeout: Duration,

    /// Full path of the group or project to list work items from
    #[serde(default)]
    pub full_path: Option<String>,

    /// Work item types to list, e.g. `ISSUE` or `TASK`. Empty lists every type.
    #[serde(default)]
    pub types: Vec<String>,

    /// Number of work items per page
    #[serde(default = "defaults::page_size")]
    pub page_size: u32,

    /// Widgets to request. Defaults to every widget the backend supports.
    #[serde(default)]
    pub widgets: Option<Vec<String>>,

    /// Logging configuration
    #[serde(default)]
    pub logging: Logging,
}

impl Config {
    /// An HTTP client for the configured endpoint
    pub fn client(&self) -> Result<HttpClient, GraphQLError> {
        let client = HttpClient::new(self.endpoint.clone(), self.headers.clone(), self.timeout)?;
        match &self.token {
            Some(token) => client.with_token(token),
            None => Ok(client),
        }
    }

    /// Query variables for the first page of `full_path`
    pub fn variables(&self, full_path: impl Into<String>) -> WorkItemsVariables {
        let variables = WorkItemsVariables::new(full_path).with_first(self.page_size);
        if self.types.is_empty() {
            variables
        } else {
            variables.with_types(self.types.iter().cloned())
        }
    }
}

mod defaults {
    use std::time::Duration;

    pub(super) const fn timeout() -> Duration {
        Duration::from_secs(30)
    }

    pub(super) const fn page_size() -> u32 {
        work_items_graphql::query_builder::DEFAULT_PAGE_SIZE
    }
}

mod parsers {
    use std::str::FromStr;

    use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
    use serde::Deserializer;

    pub(super) fn header_map<'de, D>(deserializer: D) -> Result<HeaderMap, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct HeaderMapVisitor;
        impl<'de> serde::de::Visitor<'de> for HeaderMapVisitor {
            type Value = HeaderMap;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a map of header string keys and values")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut parsed = HeaderMap::with_capacity(map.size_hint().unwrap_or(0));

                while let Some((key, value)) = map.next_entry::<String, String>()? {
                    let key = HeaderName::from_str(&key)
                        .map_err(|e| serde::de::Error::custom(e.to_string()))?;
                    let value = HeaderValue::from_str(&value)
                        .map_err(|e| serde::de::Error::custom(e.to_string()))?;

                    parsed.insert(key, value);
                }

                Ok(parsed)
            }
        }

        deserializer.deserialize_map(HeaderMapVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(yaml: &str) -> Result<Config, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    #[test]
    fn parses_headers_and_timeout() {
        let config = config(
            r#"
            endpoint: https://gitlab.example.com/api/graphql
            timeout: 2s 500ms
            headers:
              x-request-source: work-items
            "#,
        )
        .unwrap();

        assert_eq!(config.timeout, Duration::from_millis(2500));
        assert_eq!(
            config.headers.get("x-request-source").unwrap(),
            "work-items"
        );
    }

    #[test]
    fn rejects_invalid_header_names() {
        let result = config(
            r#"
            endpoint: https://gitlab.example.com/api/graphql
            headers:
              "bad header": value
            "#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn builds_variables_from_config() {
        let config = config(
            r#"
            endpoint: https://gitlab.example.com/api/graphql
            page_size: 50
            types: [ISSUE, TASK]
            "#,
        )
        .unwrap();

        assert_eq!(
            config.variables("group/project"),
            WorkItemsVariables::new("group/project")
                .with_first(50)
                .with_types(["ISSUE", "TASK"])
        );
    }

    #[test]
    fn builds_a_client_with_token() {
        let config = config(
            r#"
            endpoint: https://gitlab.example.com/api/graphql
            token: glpat-secret
            "#,
        )
        .unwrap();

        let client = config.client().unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "https://gitlab.example.com/api/graphql"
        );
    }
}
