//! Customer records and the one-shot portfolio snapshot

use crate::controller::MarketDataController;
use crate::error::{PipelineError, Result};
use crate::store::FileStore;
use finsight_client::MarketDataApi;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

/// Metric compared across a customer's portfolio
const PORTFOLIO_METRIC: &str = "market_cap";

/// A single holding in a customer's portfolio
///
/// The record file carries more fields per investment; only the company
/// name matters here and the rest is ignored on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Investment {
    pub company: String,
}

/// One customer from the static record file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub investments: Vec<Investment>,
}

#[derive(Debug, Deserialize)]
struct CustomerBook {
    customers: Vec<CustomerRecord>,
}

/// Read-only directory of customer records, loaded once
#[derive(Debug, Clone)]
pub struct CustomerDirectory {
    customers: Vec<CustomerRecord>,
}

impl CustomerDirectory {
    /// Load the record file through the store
    pub fn load(store: &dyn FileStore, path: &Path) -> Result<Self> {
        let bytes = store.read(path)?.ok_or_else(|| {
            PipelineError::Config(format!("customer file {} not found", path.display()))
        })?;
        let book: CustomerBook = serde_json::from_slice(&bytes)?;

        info!(customers = book.customers.len(), "customer records loaded");
        Ok(Self {
            customers: book.customers,
        })
    }

    /// Look up one customer by id
    pub fn get(&self, customer_id: &str) -> Option<&CustomerRecord> {
        self.customers
            .iter()
            .find(|customer| customer.id == customer_id)
    }

    /// Companies the customer holds; empty for unknown customers
    pub fn companies_for(&self, customer_id: &str) -> Vec<String> {
        self.get(customer_id)
            .map(|customer| {
                customer
                    .investments
                    .iter()
                    .map(|investment| investment.company.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// One-shot builder for the customer-stocks snapshot
///
/// Resolves the customer's portfolio, compares the held companies on
/// market capitalization, and persists the full comparison envelope.
/// Every failure is reported as `false` plus a log line; nothing is raised
/// to the caller.
pub struct CustomerSnapshotBuilder<A> {
    directory: CustomerDirectory,
    controller: Arc<MarketDataController<A>>,
    store: Arc<dyn FileStore>,
    snapshot_path: PathBuf,
}

impl<A: MarketDataApi> CustomerSnapshotBuilder<A> {
    pub fn new(
        directory: CustomerDirectory,
        controller: Arc<MarketDataController<A>>,
        store: Arc<dyn FileStore>,
        snapshot_path: PathBuf,
    ) -> Self {
        Self {
            directory,
            controller,
            store,
            snapshot_path,
        }
    }

    /// Build and persist the snapshot for one customer
    pub async fn build(&self, customer_id: &str) -> bool {
        let companies = self.directory.companies_for(customer_id);
        if companies.is_empty() {
            error!(customer_id, "no companies held by customer, snapshot not written");
            return false;
        }

        info!(customer_id, ?companies, "building customer stock snapshot");
        let report = self
            .controller
            .compare_companies(&companies, Some(PORTFOLIO_METRIC))
            .await;

        if !report.is_success() {
            error!(customer_id, "company comparison failed, keeping previous snapshot");
            return false;
        }

        let body = match serde_json::to_vec_pretty(&report) {
            Ok(body) => body,
            Err(err) => {
                error!(customer_id, error = %err, "snapshot serialization failed");
                return false;
            }
        };

        if let Err(err) = self.store.write(&self.snapshot_path, &body) {
            error!(customer_id, error = %err, "snapshot write failed");
            return false;
        }

        info!(customer_id, path = %self.snapshot_path.display(), "customer stock snapshot written");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    const RECORDS: &str = r#"{
        "customers": [
            {
                "id": "c007",
                "name": "Maria Bond",
                "investments": [
                    { "company": "Apple", "shares": 12 },
                    { "company": "Nvidia", "shares": 3 }
                ]
            },
            { "id": "c013", "name": "Fresh Account", "investments": [] }
        ]
    }"#;

    #[derive(Default, Clone)]
    struct ScriptedApi {
        failing: Arc<AtomicBool>,
    }

    #[async_trait]
    impl MarketDataApi for ScriptedApi {
        async fn query(&self, _text: &str) -> finsight_client::Result<Value> {
            Ok(json!({}))
        }

        async fn search_with_criteria(&self, _text: &str) -> finsight_client::Result<Value> {
            Ok(json!({}))
        }

        async fn company_data_search(&self, name: &str) -> finsight_client::Result<Value> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(finsight_client::ClientError::Configuration(
                    "simulated outage".to_string(),
                ));
            }
            Ok(json!({ "messages": [{ "item": r#"{"market_cap": 1.0e12}"# }], "name": name }))
        }

        async fn summary(&self, _name: &str) -> finsight_client::Result<Value> {
            Ok(json!({}))
        }

        async fn ohlcv(
            &self,
            _name: &str,
            _first: &str,
            _last: &str,
        ) -> finsight_client::Result<Value> {
            Ok(json!({}))
        }

        async fn llm(&self, _prompt: &str) -> finsight_client::Result<Value> {
            Ok(json!({}))
        }
    }

    #[derive(Default)]
    struct MemStore {
        files: Mutex<HashMap<PathBuf, Vec<u8>>>,
        writes: AtomicUsize,
    }

    impl FileStore for MemStore {
        fn read(&self, path: &Path) -> Result<Option<Vec<u8>>> {
            Ok(self.files.lock().unwrap().get(path).cloned())
        }

        fn write(&self, path: &Path, bytes: &[u8]) -> Result<()> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), bytes.to_vec());
            Ok(())
        }
    }

    fn directory(store: &MemStore) -> CustomerDirectory {
        let path = PathBuf::from("mem/customer.json");
        store.write(&path, RECORDS.as_bytes()).unwrap();
        store.writes.store(0, Ordering::SeqCst);
        CustomerDirectory::load(store, &path).unwrap()
    }

    fn builder(
        store: Arc<MemStore>,
        api: ScriptedApi,
    ) -> CustomerSnapshotBuilder<ScriptedApi> {
        let directory = directory(&store);
        CustomerSnapshotBuilder::new(
            directory,
            Arc::new(MarketDataController::new(api)),
            store as Arc<dyn FileStore>,
            PathBuf::from("mem/customer_stocks.json"),
        )
    }

    #[test]
    fn test_directory_lookup() {
        let store = MemStore::default();
        let directory = directory(&store);

        assert_eq!(directory.get("c007").unwrap().name, "Maria Bond");
        assert!(directory.get("c404").is_none());
        assert_eq!(directory.companies_for("c007"), vec!["Apple", "Nvidia"]);
        assert!(directory.companies_for("c404").is_empty());
    }

    #[test]
    fn test_directory_load_requires_file() {
        let store = MemStore::default();
        let result = CustomerDirectory::load(&store, Path::new("mem/absent.json"));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_build_writes_comparison_envelope() {
        let store = Arc::new(MemStore::default());
        let builder = builder(Arc::clone(&store), ScriptedApi::default());

        assert!(builder.build("c007").await);

        let bytes = store
            .read(Path::new("mem/customer_stocks.json"))
            .unwrap()
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["status"], json!("success"));
        assert_eq!(body["metric"], json!("market_cap"));
        assert_eq!(body["companies"], json!(["Apple", "Nvidia"]));
        assert_eq!(body["comparison"]["Apple"], json!(1.0e12));
    }

    #[tokio::test]
    async fn test_build_without_investments_writes_nothing() {
        let store = Arc::new(MemStore::default());
        let builder = builder(Arc::clone(&store), ScriptedApi::default());

        assert!(!builder.build("c013").await);
        assert_eq!(store.writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_build_unknown_customer_fails() {
        let store = Arc::new(MemStore::default());
        let builder = builder(Arc::clone(&store), ScriptedApi::default());

        assert!(!builder.build("c404").await);
        assert_eq!(store.writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_build_transport_failure_keeps_previous_snapshot() {
        let store = Arc::new(MemStore::default());
        let api = ScriptedApi::default();
        let builder = builder(Arc::clone(&store), api.clone());

        assert!(builder.build("c007").await);
        let before = store
            .read(Path::new("mem/customer_stocks.json"))
            .unwrap()
            .unwrap();

        api.failing.store(true, Ordering::SeqCst);
        assert!(!builder.build("c007").await);

        let after = store
            .read(Path::new("mem/customer_stocks.json"))
            .unwrap()
            .unwrap();
        assert_eq!(after, before);
    }
}
