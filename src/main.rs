//! Novel Moderation - 命令行入口
//!
//! - analyze: 分析文件（带缓存）
//! - analyze-text: 分析标准输入
//! - report / invalidate: 查询 / 删除缓存报告
//! - show-config: 打印生效配置

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tokio::io::AsyncReadExt;

use novel_moderation::application::{
    AnalyzeBook, AnalyzeBookHandler, AnalyzeBookResponse, BookSource, GetBookReport,
    GetBookReportHandler, InvalidateBookReport, InvalidateBookReportHandler, KeyValueStorePort,
    ModerationFacade, ReportCache,
};
use novel_moderation::config::{load_config_from_path, print_config, AppConfig};
use novel_moderation::infrastructure::{InMemoryReportStore, SledReportStore, SledStoreConfig};

#[derive(Debug, Parser)]
#[command(name = "novel-moderation", version, about = "Novel content moderation engine")]
struct Cli {
    /// 配置文件路径（默认搜索 moderation.toml / moderation.local.toml）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 分析文本文件
    Analyze {
        path: PathBuf,

        /// 书名，默认取文件名
        #[arg(long)]
        book: Option<String>,

        #[arg(long, default_value = "")]
        author: String,

        /// 忽略缓存重新分析
        #[arg(long)]
        force: bool,
    },
    /// 分析标准输入中的文本
    AnalyzeText {
        /// 提供书名时结果写入缓存
        #[arg(long)]
        book: Option<String>,

        #[arg(long, default_value = "")]
        author: String,
    },
    /// 查看缓存的审核报告
    Report(BookArgs),
    /// 删除缓存的审核报告
    Invalidate(BookArgs),
    /// 打印生效配置（TOML）
    ShowConfig,
}

#[derive(Debug, Args)]
struct BookArgs {
    #[arg(long)]
    book: String,

    #[arg(long, default_value = "")]
    author: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config_from_path(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);
    print_config(&config);

    match cli.command {
        Command::ShowConfig => {
            println!("{}", toml::to_string_pretty(&config)?);
        }
        Command::Analyze {
            path,
            book,
            author,
            force,
        } => {
            let book_name = book.unwrap_or_else(|| {
                path.file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_default()
            });
            let cache = build_cache(&config)?;
            let handler = AnalyzeBookHandler::new(build_facade(&config)?, cache.clone());
            let response = handler
                .handle(AnalyzeBook {
                    book_name,
                    author,
                    source: BookSource::File(path),
                    force,
                })
                .await?;
            cache.flush().await?;
            print_response(&response)?;
        }
        Command::AnalyzeText { book, author } => {
            // 标准输入按配置的字符集解码
            let mut bytes = Vec::new();
            tokio::io::stdin().read_to_end(&mut bytes).await?;

            let facade = build_facade(&config)?;
            match book {
                Some(book_name) => {
                    let cache = build_cache(&config)?;
                    let handler = AnalyzeBookHandler::new(facade, cache.clone());
                    let response = handler
                        .handle(AnalyzeBook {
                            book_name,
                            author,
                            source: BookSource::Bytes(bytes),
                            force: true,
                        })
                        .await?;
                    cache.flush().await?;
                    print_response(&response)?;
                }
                None => {
                    let result = tokio::task::spawn_blocking(move || facade.analyze_bytes(&bytes)).await??;
                    println!("{}", serde_json::to_string_pretty(&result)?);
                }
            }
        }
        Command::Report(args) => {
            let handler = GetBookReportHandler::new(build_cache(&config)?);
            let report = handler
                .handle(GetBookReport {
                    book_name: args.book,
                    author: args.author,
                })
                .await?;
            match report {
                Some(payload) => println!("{}", serde_json::to_string_pretty(&payload)?),
                None => {
                    tracing::info!("No cached report");
                    println!("null");
                }
            }
        }
        Command::Invalidate(args) => {
            let cache = build_cache(&config)?;
            InvalidateBookReportHandler::new(cache.clone())
                .handle(InvalidateBookReport {
                    book_name: args.book,
                    author: args.author,
                })
                .await?;
            cache.flush().await?;
        }
    }

    Ok(())
}

/// 初始化日志（输出到 stderr，stdout 只输出 JSON 结果）
fn init_tracing(config: &AppConfig) {
    let log_filter = format!("{},novel_moderation={}", config.log.level, config.log.level);
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        );

    if config.log.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

fn build_facade(config: &AppConfig) -> anyhow::Result<Arc<ModerationFacade>> {
    Ok(Arc::new(ModerationFacade::new(config.moderation.clone())?))
}

/// 创建报告缓存：启用时使用 Sled，否则使用进程内存储
fn build_cache(config: &AppConfig) -> anyhow::Result<ReportCache> {
    let store: Arc<dyn KeyValueStorePort> = if config.cache.enabled {
        if let Some(parent) = std::path::Path::new(&config.cache.db_path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let store_config = SledStoreConfig {
            db_path: config.cache.db_path.clone(),
        };
        Arc::new(SledReportStore::new(&store_config)?)
    } else {
        Arc::new(InMemoryReportStore::new())
    };
    Ok(ReportCache::new(store))
}

fn print_response(response: &AnalyzeBookResponse) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "fromCache": response.from_cache,
        "report": response.payload,
        "result": response.result,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
