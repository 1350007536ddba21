use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use top100_common::compare::{comparison_columns, CompareList, CompareToggle, MAX_COMPARE, MIN_COMPARE};
use top100_common::dataset::{resolve_year, LoadedYear};
use top100_common::filter::{filter_wines, options_for, sort_wines, Facet, humanize_sub_category};
use top100_common::label::{wine_delivery_url, wine_srcset, DeliveryParams};
use top100_common::links::{share_url, ShareLink};
use top100_common::selection::{SelectionManager, TastingStatus};
use top100_common::Wine;
use top100_rust::{cli, config, display, error, export, loader, pwl_client, store};
use cli::{Cli, Commands};
use config::Config;
use error::Top100Error;
use store::FileStore;
use tracing_subscriber::EnvFilter;

/// srcset に使う幅
const SRCSET_WIDTHS: [u32; 4] = [320, 480, 640, 800];

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "top100=debug,top100_rust=debug,top100_common=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn find_wine<'a>(loaded: &'a LoadedYear, id: &str) -> error::Result<&'a Wine> {
    loaded
        .wines
        .iter()
        .find(|w| w.id == id)
        .ok_or_else(|| Top100Error::WineNotFound(format!("{} ({}年)", id, loaded.year)))
}

fn report_year(loaded: &LoadedYear) {
    if loaded.used_fallback() {
        println!(
            "⚠ {}年のデータを読み込めないため{}年を表示します",
            loaded.requested, loaded.year
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load().context("設定の読み込みに失敗しました")?;
    let data_dir: PathBuf = cli.data_dir.clone().unwrap_or_else(|| config.data_dir());
    let year = resolve_year(cli.year, config.current_year);
    let load = || loader::load_year(&data_dir, year, config.fallback_year);
    let open_record = || -> error::Result<SelectionManager<FileStore>> {
        Ok(SelectionManager::load(FileStore::new(config.record_path()?)))
    };

    match cli.command {
        Commands::List { filter, sort, limit, json } => {
            let loaded = load()?;
            report_year(&loaded);
            let record = open_record()?;

            let state = filter.to_state();
            let mut wines = filter_wines(&loaded.wines, &state);
            sort_wines(&mut wines, sort);
            let total = wines.len();
            if let Some(limit) = limit {
                wines.truncate(limit);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&wines)?);
            } else {
                println!("🍷 Top 100 {} ({}/{}本)\n", loaded.year, total, loaded.wines.len());
                for wine in &wines {
                    println!("{}", display::wine_line(wine, record.selection().get(&wine.id)));
                }
                if wines.is_empty() {
                    println!("条件に一致するワインはありません");
                }
            }
        }

        Commands::Options { filter } => {
            let loaded = load()?;
            report_year(&loaded);
            let state = filter.to_state();

            for facet in [Facet::Category, Facet::Locale, Facet::SubCategory] {
                let options = options_for(facet, &loaded.wines, &state);
                let labels: Vec<String> = match facet {
                    Facet::SubCategory => options
                        .iter()
                        .map(|o| {
                            if o == top100_common::filter::ALL {
                                o.clone()
                            } else {
                                format!("{} ({})", humanize_sub_category(o), o)
                            }
                        })
                        .collect(),
                    _ => options,
                };
                println!("{}:", facet.label());
                for label in labels {
                    println!("  {}", label);
                }
            }
        }

        Commands::Show { id } => {
            let loaded = load()?;
            report_year(&loaded);
            let record = open_record()?;
            let wine = find_wine(&loaded, &id)?;
            println!("{}", display::wine_detail(wine, loaded.year, record.selection().get(&wine.id)));
        }

        Commands::Taste { id, status, clear } => {
            let loaded = load()?;
            let wine = find_wine(&loaded, &id)?;
            let mut record = open_record()?;

            let status = if clear { None } else { status.or(Some(TastingStatus::Tasted)) };
            record.set_status(&wine.id, status)?;

            match status {
                Some(status) => println!("✔ {} を「{}」に設定しました", wine.full_label(), status.label()),
                None => println!("✔ {} の記録を解除しました", wine.full_label()),
            }
            let stats = record.selection().stats(&loaded.wines);
            println!("  {}年: Tasted {} / Want to Taste {}", loaded.year, stats.tasted, stats.want);
        }

        Commands::Saved { status } => {
            let loaded = load()?;
            report_year(&loaded);
            let record = open_record()?;
            let selection = record.selection();

            let statuses = match status {
                Some(status) => vec![status],
                None => vec![TastingStatus::Tasted, TastingStatus::Want],
            };
            for status in statuses {
                let wines = selection.wines_with_status(&loaded.wines, status);
                println!("{} ({}本)", status.label(), wines.len());
                for wine in wines {
                    println!("{}", display::wine_line(wine, Some(status)));
                }
                println!();
            }

            let hidden = selection.len() - selection.retain_known(&loaded.wines).len();
            if hidden > 0 {
                println!("※ 他の年度の記録 {}件 は表示していません", hidden);
            }
        }

        Commands::Export { format, output } => {
            println!("📄 top100 - エクスポート\n");
            let loaded = load()?;
            report_year(&loaded);
            let record = open_record()?;

            let rows = record.selection().to_export_rows(&loaded.wines);
            let output = output.unwrap_or_else(|| PathBuf::from("."));
            let path = export::write_export(&rows, loaded.year, &export::today(), format, &output)?;
            println!("✔ {}件を出力: {}", rows.len(), path.display());
        }

        Commands::Share { base_url } => {
            let loaded = load()?;
            report_year(&loaded);
            let record = open_record()?;

            let current = record.selection().retain_known(&loaded.wines);
            println!("{}", share_url(&base_url, &current, loaded.year));
        }

        Commands::ImportShare { link } => {
            let query = match link.split_once('?') {
                Some((_, query)) => query,
                None => link.as_str(),
            };
            let query = query.split('#').next().unwrap_or(query);
            let share = ShareLink::parse(query);
            if share.tasted.is_empty() {
                return Err(Top100Error::InvalidShareLink(link).into());
            }

            let mut record = open_record()?;
            let count = record.import_tasted(share.tasted.iter().map(String::as_str))?;
            println!("✔ {}本を Tasted として取り込みました", count);
            if let Some(shared_year) = share.year {
                println!("  共有元の年度: {} (`--year {}` で表示)", shared_year, shared_year);
            }
            if let Some(wine) = share.wine {
                println!("  共有されたワイン: {}", wine);
            }
        }

        Commands::Compare { ids } => {
            if !(MIN_COMPARE..=MAX_COMPARE).contains(&ids.len()) {
                return Err(Top100Error::CompareCount {
                    given: ids.len(),
                    min: MIN_COMPARE,
                    max: MAX_COMPARE,
                }
                .into());
            }
            let loaded = load()?;
            report_year(&loaded);

            let mut list = CompareList::new();
            for id in &ids {
                find_wine(&loaded, id)?;
                if list.toggle(id) == CompareToggle::Full {
                    println!("⚠ 比較は{}本までです: {}", MAX_COMPARE, id);
                }
            }
            let wines = list.wines(&loaded.wines);
            println!("{}", display::comparison_table(&comparison_columns(&wines)));
        }

        Commands::Label { id, width, srcset: with_srcset } => {
            let loaded = load()?;
            let wine = find_wine(&loaded, &id)?;

            let url = match width {
                Some(w) => wine_delivery_url(wine, &DeliveryParams::width(w)),
                None => wine_delivery_url(wine, &DeliveryParams::new()),
            };
            println!("{}", url);
            if with_srcset {
                println!("{}", wine_srcset(wine, &SRCSET_WIDTHS));
            }
        }

        Commands::Pwl { id } => {
            let loaded = load()?;
            let wine = find_wine(&loaded, &id)?;
            println!("- {} を Personal Wine List に追加中...", wine.full_label());

            let client = pwl_client::PwlClient::new(
                &config.api_base,
                config.pwl_session(),
                config.timeout_seconds,
            );
            let outcome = client.add_wine(wine).await;
            if outcome.is_success() {
                println!("✔ {}", outcome.message());
            } else {
                println!("✖ {}", outcome.message());
                if let Some(code) = outcome.code() {
                    println!("  code: {}", code);
                }
            }
        }

        Commands::Convert { input, output } => {
            println!("📄 top100 - CSV変換\n");
            let count = loader::convert_csv(&input, &output)?;
            println!("✔ {}件を変換: {} → {}", count, input.display(), output.display());
        }

        Commands::Config { set_data_dir, set_api_base, set_pwl_session, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(dir) = set_data_dir {
                config.data_dir = Some(dir);
                changed = true;
            }
            if let Some(base) = set_api_base {
                config.api_base = base;
                changed = true;
            }
            if let Some(session) = set_pwl_session {
                config.pwl_session = Some(session);
                changed = true;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  データディレクトリ: {}", config.data_dir().display());
                println!("  最新年度: {}", config.current_year);
                println!("  代替年度: {}", config.fallback_year);
                println!("  PWL API: {}", config.api_base);
                println!(
                    "  PWLセッション: {}",
                    if config.pwl_session().is_some() { "設定済み" } else { "未設定" }
                );
                println!("  記録ファイル: {}", config.record_path()?.display());
            }
        }
    }

    Ok(())
}
