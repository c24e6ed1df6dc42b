use catalog_image_common::{normalize, ColorAliasTable, MatchReport, MatchResult};
use catalog_image_sync::{cli, config, error, logging, pipeline, products};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use error::{Result, SyncError};

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    let config = Config::load()?;

    match cli.command {
        Commands::Match { products: products_path, source, base_url, aliases, default_image, output, report } => {
            println!("🔗 catalog-sync - 商品・画像照合\n");

            let base_url = base_url.or_else(|| config.base_url.clone());
            let source = source
                .into_source(base_url)
                .ok_or_else(|| SyncError::Config("--images か --index を指定してください".into()))?;

            // 1. 商品読み込み
            println!("[1/4] 商品を読み込み中...");
            let product_list = products::load_products(&products_path)?;
            println!("✔ {}件の商品\n", product_list.len());

            // 2. 画像一覧
            println!("[2/4] 画像一覧を読み込み中...");
            let listing = pipeline::load_images(&source)?;
            println!(
                "✔ {}枚の画像（スキップ {}件）\n",
                listing.entries.len(),
                listing.skipped.len()
            );

            // 3. 照合
            println!("[3/4] 照合中...");
            let options = pipeline::build_match_options(&config, aliases.as_deref(), default_image.as_deref())?;
            let outcome = pipeline::run(&product_list, listing, &options)?;
            println!(
                "✔ 完全一致 {} / エイリアス一致 {} / 画像なし {}\n",
                outcome.report.exact_matches, outcome.report.alias_matches, outcome.report.unmatched
            );

            // 4. 保存
            println!("[4/4] 結果を保存中...");
            pipeline::write_results(&output, &outcome.results)?;
            println!("✔ 結果を保存: {}", output.display());

            if let Some(report_path) = report {
                pipeline::write_report(&report_path, &outcome.report)?;
                println!("✔ レポートを保存: {}", report_path.display());
            }

            println!("\n✅ 照合完了");
        }

        Commands::Groups { source, base_url, model } => {
            let base_url = base_url.or_else(|| config.base_url.clone());
            let source = source
                .into_source(base_url)
                .ok_or_else(|| SyncError::Config("--images か --index を指定してください".into()))?;

            let listing = pipeline::load_images(&source)?;
            let skipped = listing.skipped.clone();
            let groups = catalog_image_common::group_images(listing.entries);
            let model = model.map(|m| m.trim().to_uppercase());

            println!("画像グループ: {}件\n", groups.len());
            for (key, group) in &groups {
                if model.as_deref().is_some_and(|m| m != key.model_ref) {
                    continue;
                }
                let primary = group.entries.first().map(|e| e.is_primary).unwrap_or(false);
                println!(
                    "  {:<24} {}枚  {}{}",
                    key.to_string(),
                    group.len(),
                    group.image_url().unwrap_or("-"),
                    if primary { "  [F]" } else { "" }
                );
            }

            if !skipped.is_empty() {
                println!("\nスキップしたファイル: {}件", skipped.len());
                for s in &skipped {
                    println!("  {} ({})", s.filename, s.reason);
                }
            }
        }

        Commands::Color { color, against, aliases } => {
            let mut table = ColorAliasTable::builtin();
            if let Some(path) = aliases.as_deref().or(config.alias_file.as_deref()) {
                table.merge(&ColorAliasTable::from_file(path)?);
            }

            let token = normalize(&color);
            println!("{:?} → {}", color, token);

            let known = table.aliases_of(&token);
            if !known.is_empty() {
                let list: Vec<&str> = known.iter().map(|a| a.as_str()).collect();
                println!("  別名: {}", list.join(", "));
            }

            if let Some(other) = against {
                let other_token = normalize(&other);
                let same = table.equivalent(&token, &other_token);
                println!(
                    "{:?} → {}\n{}",
                    other,
                    other_token,
                    if same { "✔ 同じ色として扱います" } else { "✘ 別の色です" }
                );
            }
        }

        Commands::Report { input, output } => {
            if !input.exists() {
                return Err(SyncError::FileNotFound(input.display().to_string()));
            }
            let content = std::fs::read_to_string(&input)?;
            let results: Vec<MatchResult> = serde_json::from_str(&content)?;
            let report = MatchReport::build(&results, &[]);

            print!("{}", report);

            if let Some(path) = output {
                pipeline::write_report(&path, &report)?;
                println!("\n✔ レポートを保存: {}", path.display());
            }
        }

        Commands::Config { set_base_url, set_default_image, set_alias_file, show } => {
            // 保存は環境変数を反映しない値で行う
            let mut stored = Config::load_from(&Config::config_path()?)?;
            let changed = set_base_url.is_some() || set_default_image.is_some() || set_alias_file.is_some();

            if let Some(url) = set_base_url {
                stored.base_url = Some(url);
            }
            if let Some(image) = set_default_image {
                stored.default_image = image;
            }
            if let Some(path) = set_alias_file {
                stored.alias_file = Some(path);
            }
            if changed {
                stored.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                let config = stored.with_env_overrides(|key| std::env::var(key).ok());
                println!("設定:");
                println!("  画像URL接頭辞: {}", config.base_url.as_deref().unwrap_or("未設定"));
                println!("  既定画像: {}", config.default_image);
                println!(
                    "  色エイリアス: {}",
                    config
                        .alias_file
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "組み込みのみ".into())
                );
                println!("  エイリアス表バージョン: {}", catalog_image_common::ALIAS_TABLE_VERSION);
            }
        }
    }

    Ok(())
}
