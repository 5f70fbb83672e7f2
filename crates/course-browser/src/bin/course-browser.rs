//! Course browser command line
//!
//! Run with: cargo run -p course-browser -- --help

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use course_browser::{
    logging,
    tools::{MindMapTool, ToolKind},
    Browser, BrowserConfig, LoadState,
};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "course-browser")]
#[command(about = "Browse course files, search them by content and study them with a RAG API")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the files in the configured folder
    List,
    /// Filter files by name, or by content with --smart
    Search {
        query: String,

        /// Search file contents through the RAG API
        #[arg(long)]
        smart: bool,

        /// Print why each file matched
        #[arg(long, requires = "smart")]
        explain: bool,
    },
    /// Ask a question about the course
    Ask {
        prompt: String,

        /// Storage key of a file to attach (repeatable)
        #[arg(short, long = "file")]
        files: Vec<String>,
    },
    /// Generate flashcards
    Flashcards {
        /// Instructions; the configured default prompt is used when omitted
        prompt: Option<String>,

        /// Storage key of a file to attach (repeatable)
        #[arg(short, long = "file")]
        files: Vec<String>,
    },
    /// Download a file
    Download {
        key: String,

        /// Target directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
    /// Print a mind map as an outline
    MindMap {
        /// JSON file with a `root` node; the sample map is shown otherwise
        #[arg(long)]
        data: Option<PathBuf>,
    },
    /// Interactive session
    Browse,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = BrowserConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    logging::init(&config.logging.filter);

    if let Commands::MindMap { data } = &cli.command {
        return print_mind_map(data.as_deref()).await;
    }

    let mut browser = Browser::from_config(&config)?;

    match cli.command {
        Commands::List => {
            browser.load().await.map_err(|e| anyhow::anyhow!(e.user_message()))?;
            print_files(&browser);
        }
        Commands::Search {
            query,
            smart,
            explain,
        } => {
            browser.load().await.map_err(|e| anyhow::anyhow!(e.user_message()))?;
            if explain {
                let details = browser
                    .explain_search(&query)
                    .await
                    .map_err(|e| anyhow::anyhow!(e.user_message()))?;
                let matched = browser.files_matching(details.sources.as_slice());
                println!("{} archivo(s) encontrado(s) con contenido relacionado", matched.len());
                for (i, file) in matched.iter().enumerate() {
                    println!("{:>3}     {}", i + 1, file.file_name);
                }

                println!();
                if !details.data.search_summary.is_empty() {
                    println!("{}", details.data.search_summary);
                }
                for file in &details.data.matching_files {
                    println!("* {} ({}): {}", file.file, file.relevance.label(), file.reason);
                    if !file.matching_topics.is_empty() {
                        println!("    temas: {}", file.matching_topics.join(", "));
                    }
                }
                if let Some(reason) = &details.data.no_matches_reason {
                    println!("{}", reason);
                }
                return Ok(());
            }

            if smart {
                browser.toggle_smart_search();
            }
            browser.set_query(query.as_str());
            if smart {
                browser.search().settled().await;
            }
            print_files(&browser);
        }
        Commands::Ask { prompt, files } => {
            for key in &files {
                browser.toggle_selection(key);
            }
            ask(&mut browser, &prompt).await?;
        }
        Commands::Flashcards { prompt, files } => {
            for key in &files {
                browser.toggle_selection(key);
            }
            flashcards(&mut browser, prompt.as_deref().unwrap_or("")).await?;
        }
        Commands::Download { key, out } => {
            let path = browser
                .download(&key, &out)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            println!("{}", path.display());
        }
        Commands::MindMap { .. } => {}
        Commands::Browse => browse(browser).await?,
    }

    Ok(())
}

async fn print_mind_map(data: Option<&Path>) -> Result<()> {
    let tool = match data {
        Some(path) => MindMapTool::load_json(path)
            .await
            .with_context(|| format!("Failed to read mind map {}", path.display()))?,
        None => MindMapTool::default(),
    };
    for line in tool.outline() {
        println!("{}", line);
    }
    println!("({} nodos, {} niveles)", tool.node_count(), tool.depth());
    Ok(())
}

fn print_files(browser: &Browser) {
    match browser.load_state() {
        LoadState::Loading => println!("Cargando archivos..."),
        LoadState::Failed(msg) => println!("Error: {}", msg),
        LoadState::Ready => {
            if let Some(status) = browser.search_status() {
                println!("{}", status);
            }
            let visible = browser.visible_files();
            if visible.is_empty() {
                println!("No se encontraron archivos");
            }
            for (i, file) in visible.iter().enumerate() {
                let mark = if browser.selection().contains(&file.key) { "x" } else { " " };
                let size = file.display_size().unwrap_or_default();
                println!("{:>3} [{}] {}  {}", i + 1, mark, file.file_name, size);
            }
        }
    }
}

async fn ask(browser: &mut Browser, prompt: &str) -> Result<()> {
    let chat = &mut browser.tools.chat;
    chat.set_input(prompt);
    match chat.send().await {
        Ok(false) => println!("Escribe una pregunta o adjunta archivos"),
        Ok(true) => {
            if let Some(reply) = chat.messages().last() {
                println!("{}", reply.text);
                if let Some(answer) = &reply.answer {
                    if let Some(confidence) = answer.confidence {
                        println!("\nConfianza: {}", confidence.label());
                    }
                    for source in &answer.sources {
                        println!("  - {}", source.format_inline());
                    }
                    if let Some(limitations) = &answer.limitations {
                        println!("Limitaciones: {}", limitations);
                    }
                    for followup in &answer.followups {
                        println!("  ? {}", followup);
                    }
                }
            }
        }
        Err(e) => anyhow::bail!(chat.error().map(str::to_string).unwrap_or_else(|| e.to_string())),
    }
    Ok(())
}

async fn flashcards(browser: &mut Browser, prompt: &str) -> Result<()> {
    let tool = &mut browser.tools.flashcards;
    tool.set_prompt(prompt);
    if let Err(e) = tool.generate().await {
        anyhow::bail!(tool.error().map(str::to_string).unwrap_or_else(|| e.to_string()));
    }

    for card in tool.cards() {
        let data = &card.data;
        println!("{}. {}", data.id, data.question);
        println!("   -> {}", data.answer);
        let mut meta = Vec::new();
        if let Some(difficulty) = data.difficulty {
            meta.push(difficulty.label().to_string());
        }
        if let Some(topic) = &data.topic {
            meta.push(topic.clone());
        }
        if let Some(source) = &data.source {
            meta.push(source.format_inline());
        }
        if !meta.is_empty() {
            println!("   [{}]", meta.join(" | "));
        }
    }
    if !tool.topics().is_empty() {
        println!("\nTemas: {}", tool.topics().join(", "));
    }
    Ok(())
}

const HELP: &str = "\
texto          filtra por nombre (o por contenido con búsqueda inteligente)
:smart         activa/desactiva la búsqueda inteligente
:select KEY|N  adjunta o quita un archivo
:clear         quita todos los adjuntos
:ask TEXTO     pregunta en el chat
:cards [TEXTO] genera flashcards
:tab NOMBRE    cambia de herramienta (chat, flashcards, mindmap)
:quit          salir";

async fn browse(mut browser: Browser) -> Result<()> {
    if let Err(e) = browser.load().await {
        eprintln!("{}", e.user_message());
    }
    print_files(&browser);
    println!("\n{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim_end();
        let (command, arg) = match line.strip_prefix(':') {
            Some(rest) => {
                let mut parts = rest.splitn(2, ' ');
                (parts.next().unwrap_or(""), parts.next().unwrap_or("").trim())
            }
            None => {
                browser.set_query(line);
                if browser.search().state().smart_search_enabled {
                    browser.search().settled().await;
                }
                print_files(&browser);
                continue;
            }
        };

        match command {
            "quit" | "q" => break,
            "smart" => {
                let enabled = browser.toggle_smart_search();
                println!("Búsqueda inteligente {}", if enabled { "activada" } else { "desactivada" });
                browser.search().settled().await;
                print_files(&browser);
            }
            "select" => {
                let key = match arg.parse::<usize>() {
                    Ok(n) if n >= 1 => browser.visible_files().get(n - 1).map(|f| f.key.clone()),
                    _ if !arg.is_empty() => Some(arg.to_string()),
                    _ => None,
                };
                match key {
                    Some(key) => {
                        let attached = browser.toggle_selection(&key);
                        println!("{} {}", if attached { "+" } else { "-" }, key);
                    }
                    None => println!("Uso: :select KEY|N"),
                }
            }
            "clear" => {
                browser.clear_selection();
                println!("Adjuntos eliminados");
            }
            "ask" => {
                browser.tools.set_active(ToolKind::Chat);
                if let Err(e) = ask(&mut browser, arg).await {
                    eprintln!("{}", e);
                }
            }
            "cards" => {
                browser.tools.set_active(ToolKind::Flashcards);
                if let Err(e) = flashcards(&mut browser, arg).await {
                    eprintln!("{}", e);
                }
            }
            "tab" => match arg.parse::<ToolKind>() {
                Ok(kind) => {
                    browser.tools.set_active(kind);
                    println!("Herramienta: {}", kind);
                    if kind == ToolKind::MindMap {
                        for line in browser.tools.mind_map.outline() {
                            println!("{}", line);
                        }
                    }
                }
                Err(e) => eprintln!("{}", e),
            },
            "help" | "h" => println!("{}", HELP),
            other => println!("Comando desconocido: :{}", other),
        }
    }

    Ok(())
}
