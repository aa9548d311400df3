use clap::Parser;
use rfp_matcher::{catalog_source, cli, config, error, export};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use rfp_matcher_common::{EngineOptions, MatchingEngine, RunSummary};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load()?;

    match cli.command {
        Commands::Match { input, catalog, top_n, output, excel } => {
            println!("📋 rfp-matcher - カタログ照合\n");

            if !input.exists() {
                return Err(error::MatcherError::FileNotFound(input.display().to_string()));
            }

            // 1. カタログ読み込み
            let catalog_path = config.resolve_catalog_path(catalog.as_deref());
            println!("[1/3] カタログを読み込み中... ({})", catalog_path.display());
            let catalog = catalog_source::load_catalog(&catalog_path)?;
            println!("✔ {}件のSKUを読み込み\n", catalog.len());

            // 2. 照合
            let top_n = config.resolve_top_n(top_n);
            println!("[2/3] 照合中... (候補数: {})", top_n);
            let text = std::fs::read_to_string(&input)?;
            let engine = MatchingEngine::new(EngineOptions { top_n });
            let results = engine.run(&text, &catalog);
            println!("✔ {}件の明細を照合\n", results.len());

            for (idx, result) in results.iter().enumerate() {
                match (&result.chosen_sku, result.chosen_match_percent()) {
                    (Some(sku), Some(percent)) => println!(
                        "  {}. {} (x{}) → {} ({:.2}%)",
                        idx + 1, result.requirement.description, result.requirement.quantity, sku, percent
                    ),
                    _ => println!(
                        "  {}. {} (x{}) → 選定なし",
                        idx + 1, result.requirement.description, result.requirement.quantity
                    ),
                }
            }

            // 3. 結果保存
            println!("\n[3/3] 結果を保存中...");
            let output_path = output.unwrap_or_else(|| export::default_json_path(&input));
            export::write_json(&results, &output_path)?;
            println!("✔ JSON出力: {}", output_path.display());

            if let Some(excel_path) = excel {
                export::excel::generate_excel(&results, &excel_path)?;
                println!("✔ Excel出力: {}", excel_path.display());
            }

            let summary = RunSummary::from_results(&results);
            println!("\n集計:");
            println!("  明細数: {}", summary.total_items);
            println!("  選定あり: {}", summary.selected_items);
            println!("  選定なし: {}", summary.unselected_items);
            println!("  完全一致: {}", summary.full_matches);
            if summary.zero_match_selections > 0 {
                println!("  ⚠ 一致率0%の選定: {}（要確認）", summary.zero_match_selections);
            }

            println!("\n✅ 照合完了");
        }

        Commands::Catalog { catalog } => {
            let catalog_path = config.resolve_catalog_path(catalog.as_deref());
            let catalog = catalog_source::load_catalog(&catalog_path)?;

            println!("カタログ情報:");
            println!("  パス: {}", catalog_path.display());
            println!("  件数: {}", catalog.len());
            println!("  SKU数: {}", catalog.distinct_skus());
            if catalog.duplicate_skus().is_empty() {
                println!("  重複SKU: なし");
            } else {
                println!("  重複SKU（後の行を使用）: {}", catalog.duplicate_skus().join(", "));
            }
        }

        Commands::Config { set_catalog, set_top_n, show } => {
            let mut config = config;

            if let Some(path) = set_catalog {
                config.set_catalog_path(path)?;
                println!("✔ カタログファイルを設定しました");
            }

            if let Some(top_n) = set_top_n {
                config.set_top_n(top_n)?;
                println!("✔ 候補数を設定しました");
            }

            if show {
                println!("設定:");
                println!("  カタログ: {}", config.resolve_catalog_path(None).display());
                println!("  候補数: {}", config.top_n);
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
