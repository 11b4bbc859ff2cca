#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::error::SynapseError;
    use crate::generator::agents::REQUIRED_SECTIONS;
    use crate::generator::workflow::{TimingScope, launch, launch_with_backend};
    use crate::llm::client::{AgentBackend, StageRequest};
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct CountingBackend {
        calls: AtomicUsize,
    }

    struct BrokenBackend {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AgentBackend for BrokenBackend {
        async fn run_stage(&self, _request: &StageRequest) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            anyhow::bail!("provider unavailable")
        }
    }

    #[async_trait]
    impl AgentBackend for CountingBackend {
        async fn run_stage(&self, request: &StageRequest) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if request.stage == "proposal" {
                Ok(REQUIRED_SECTIONS
                    .iter()
                    .map(|s| format!("## {}\n\ncontent\n", s))
                    .collect::<Vec<_>>()
                    .join("\n"))
            } else {
                Ok(format!("# {}\n", request.stage))
            }
        }
    }

    fn create_test_config(temp_dir: &TempDir, company: &str) -> Config {
        let mut config = Config {
            company_name: Some(company.to_string()),
            output_path: temp_dir.path().join("outputs"),
            ..Default::default()
        };
        config.llm.api_key = "llm-key".to_string();
        config.search.api_key = "search-key".to_string();
        config.cache.enabled = false;
        config
    }

    fn backend() -> Arc<CountingBackend> {
        Arc::new(CountingBackend {
            calls: AtomicUsize::new(0),
        })
    }

    #[tokio::test]
    async fn test_workflow_writes_every_artifact() {
        let temp_dir = TempDir::new().unwrap();
        let config = create_test_config(&temp_dir, "Acme Retail");
        let backend = backend();

        let report = launch_with_backend(&config, backend.clone()).await.unwrap();
        assert!(report.missing_sections().is_empty());
        assert_eq!(backend.calls.load(Ordering::SeqCst), 4);

        let outputs = temp_dir.path().join("outputs");
        for stage in ["research", "usecases", "resources", "proposal"] {
            assert!(outputs.join(format!("acme_retail_{stage}.md")).exists(), "{stage}");
        }
        assert!(outputs.join("acme_retail_final_proposal.md").exists());
        let log = std::fs::read_to_string(outputs.join("acme_retail_log.txt")).unwrap();
        assert!(log.contains("run completed"));
    }

    #[tokio::test]
    async fn test_missing_search_key_blocks_run() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = create_test_config(&temp_dir, "Acme Retail");
        config.search.api_key.clear();
        let backend = backend();

        let err = launch_with_backend(&config, backend.clone())
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SynapseError>(),
            Some(SynapseError::MissingSecret(_))
        ));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
        assert!(!temp_dir.path().join("outputs").exists());
    }

    #[tokio::test]
    async fn test_launch_validates_before_building_client() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = create_test_config(&temp_dir, "Acme Retail");
        config.llm.api_key.clear();

        let err = launch(&config).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SynapseError>(),
            Some(SynapseError::MissingSecret(_))
        ));
    }

    #[tokio::test]
    async fn test_blank_company_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let config = create_test_config(&temp_dir, "   ");
        let backend = backend();

        let err = launch_with_backend(&config, backend.clone())
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SynapseError>(),
            Some(SynapseError::InvalidInput(_))
        ));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_rerun_with_default_config_calls_the_model_again() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = create_test_config(&temp_dir, "Acme Retail");
        config.cache = Default::default();
        config.cache.cache_dir = temp_dir.path().join("cache");

        launch_with_backend(&config, backend()).await.unwrap();

        let broken = Arc::new(BrokenBackend {
            calls: AtomicUsize::new(0),
        });
        let err = launch_with_backend(&config, broken.clone())
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SynapseError>(),
            Some(SynapseError::StageFailed { .. })
        ));
        assert_eq!(broken.calls.load(Ordering::SeqCst), 1);
        assert!(!temp_dir.path().join("cache").exists());
    }

    #[tokio::test]
    async fn test_rerun_reuses_cache_when_enabled() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = create_test_config(&temp_dir, "Acme Retail");
        config.cache.enabled = true;
        config.cache.cache_dir = temp_dir.path().join("cache");

        launch_with_backend(&config, backend()).await.unwrap();

        let broken = Arc::new(BrokenBackend {
            calls: AtomicUsize::new(0),
        });
        launch_with_backend(&config, broken.clone()).await.unwrap();
        assert_eq!(broken.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_timing_scope_keeps_phase_order() {
        let mut timing = TimingScope::new();
        timing.start_phase("research");
        timing.end_phase("research");
        timing.start_phase("usecases");
        timing.end_phase("usecases");
        assert!(timing.end_phase("unknown").is_none());

        let phases: Vec<&str> = timing
            .get_phase_durations()
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(phases, vec!["research", "usecases"]);
        let report = timing.generate_timing_report();
        assert!(report.find("research").unwrap() < report.find("usecases").unwrap());
    }
}
