#[cfg(test)]
mod tests {
    use crate::cli::{Args, prompt_company, resolve_company};
    use crate::config::{Config, LLMProvider};
    use crate::error::SynapseError;
    use clap::Parser;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_args_default_values() {
        let args = Args::try_parse_from(["synapse"]).unwrap();

        assert_eq!(args.company, None);
        assert_eq!(args.output_path, None);
        assert!(!args.cache);
        assert!(!args.no_run_log);
        assert!(!args.verbose);
    }

    #[test]
    fn test_args_positional_company_and_short_options() {
        let args =
            Args::try_parse_from(["synapse", "Acme Retail", "-o", "/tmp/out", "-v"]).unwrap();

        assert_eq!(args.company.as_deref(), Some("Acme Retail"));
        assert_eq!(args.output_path, Some(PathBuf::from("/tmp/out")));
        assert!(args.verbose);
    }

    #[test]
    fn test_cli_overrides_everything() {
        let temp_dir = TempDir::new().unwrap();
        let args = Args::try_parse_from([
            "synapse",
            "Acme Retail",
            "--llm-provider",
            "openai",
            "--model",
            "gpt-4o-mini",
            "--llm-api-key",
            "cli-llm",
            "--search-api-key",
            "cli-search",
            "--temperature",
            "0.5",
            "--max-turns",
            "3",
            "--cache",
            "--no-run-log",
        ])
        .unwrap();

        let config = args
            .into_config_with(temp_dir.path(), |key| Some(format!("env-{key}")))
            .unwrap();
        assert_eq!(config.company_name.as_deref(), Some("Acme Retail"));
        assert_eq!(config.llm.provider, LLMProvider::OpenAI);
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.api_key, "cli-llm");
        assert_eq!(config.search.api_key, "cli-search");
        assert_eq!(config.llm.temperature, Some(0.5));
        assert_eq!(config.llm.max_turns, 3);
        assert!(config.cache.enabled);
        assert!(!config.write_run_log);
        // 未被命令行覆盖的可选凭据来自环境变量
        assert_eq!(config.search.github_token.as_deref(), Some("env-GITHUB_TOKEN"));
    }

    #[test]
    fn test_default_config_file_is_loaded() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("synapse.toml"),
            "company_name = \"Globex\"\noutput_path = \"reports\"\n\n[llm]\nmodel = \"gemini-1.5-pro\"\n",
        )
        .unwrap();

        let args = Args::try_parse_from(["synapse"]).unwrap();
        let config = args.into_config_with(temp_dir.path(), no_env).unwrap();
        assert_eq!(config.company_name.as_deref(), Some("Globex"));
        assert_eq!(config.output_path, PathBuf::from("reports"));
        assert_eq!(config.llm.model, "gemini-1.5-pro");
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let args = Args::try_parse_from(["synapse", "-c", "/nonexistent/synapse.toml"]).unwrap();
        assert!(args.into_config_with(temp_dir.path(), no_env).is_err());
    }

    #[test]
    fn test_unknown_provider_keeps_default() {
        let temp_dir = TempDir::new().unwrap();
        let args = Args::try_parse_from(["synapse", "--llm-provider", "nope"]).unwrap();
        let config = args.into_config_with(temp_dir.path(), no_env).unwrap();
        assert_eq!(config.llm.provider, LLMProvider::Gemini);
    }

    #[test]
    fn test_prompt_company_trims_input() {
        let mut input = "  Acme Retail \n".as_bytes();
        let mut output = Vec::new();
        let company = prompt_company(&mut input, &mut output).unwrap();
        assert_eq!(company, "Acme Retail");
        assert!(String::from_utf8(output).unwrap().contains("公司名称"));
    }

    #[test]
    fn test_missing_secret_reported_before_company_prompt() {
        let mut config = Config::default();
        let mut input = "Acme Retail\n".as_bytes();
        let mut output = Vec::new();

        let err = resolve_company(&mut config, &mut input, &mut output).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SynapseError>(),
            Some(SynapseError::MissingSecret(_))
        ));
        assert!(output.is_empty());
        assert_eq!(config.company_name, None);
    }

    #[test]
    fn test_resolve_company_prompts_only_when_missing() {
        let mut config = Config::default();
        config.llm.api_key = "llm".to_string();
        config.search.api_key = "search".to_string();

        let mut input = "Acme Retail\n".as_bytes();
        let mut output = Vec::new();
        resolve_company(&mut config, &mut input, &mut output).unwrap();
        assert_eq!(config.company_name.as_deref(), Some("Acme Retail"));
        assert!(!output.is_empty());

        let mut untouched = "Other Co\n".as_bytes();
        let mut silent = Vec::new();
        resolve_company(&mut config, &mut untouched, &mut silent).unwrap();
        assert_eq!(config.company_name.as_deref(), Some("Acme Retail"));
        assert!(silent.is_empty());
    }
}
