use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use feed_client::dates::format_day;
use feed_client::images::remove_search_params;
use feed_client::{
    Article, ArticlesPage, DayCountPage, FeedClient, FeedClientError, History, SearchState,
    ViewState, navigation,
};
use serde::Serialize;
use tracing::{debug, info};

mod logging;
mod session;
mod settings;

use logging::init_logging;
use session::{clear_history, load_history, save_history};
use settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "feed-cli", version, about = "CLI клиент ленты статей")]
struct Cli {
    /// Адрес API (по умолчанию FEED_API_URL или http://localhost:3000).
    #[arg(long, global = true)]
    server: Option<String>,

    /// Печатать ответы сервера как JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Текущая страница ленты.
    ///
    /// Курсоры берутся из сессии, флаги переопределяют их только для этого запроса.
    List {
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        article_id_cursor: Option<String>,
        #[arg(long)]
        date_cursor: Option<String>,
    },
    /// Поиск по тег-индексу, например `a23`.
    Search {
        #[arg(long)]
        query: String,
    },
    /// Закрыть поиск и вернуться к ленте.
    ClearSearch,
    /// Сводка «статей за день».
    Days,
    /// Статьи за один день.
    Day {
        #[arg(long)]
        date: String,
    },
    /// Перейти к статьям указанной даты (YYYY-MM-DD или ISO 8601).
    TimeTravel {
        #[arg(long)]
        date: String,
    },
    /// Следующая страница ленты (или сводки по дням с `--days`).
    Next {
        #[arg(long)]
        days: bool,
    },
    /// Назад по истории.
    Prev {
        #[arg(long)]
        days: bool,
    },
    /// Текущее состояние сессии.
    State,
    /// Сбросить сессию.
    Reset,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;
    init_logging(&settings.log_level)?;

    let cli = Cli::parse();
    let base_url = resolve_server(cli.server, &settings.api_url);
    let client = FeedClient::new(base_url)
        .map_err(map_client_error)?
        .with_search_limit(settings.search_limit);
    info!(server = client.base_url(), "feed-cli started");

    let session_path = PathBuf::from(&settings.session_file);
    let mut history = load_history(&session_path).context("не удалось прочитать файл сессии")?;
    let out = Output { json: cli.json };

    match cli.command {
        Command::List {
            limit,
            article_id_cursor,
            date_cursor,
        } => {
            let mut state = history.current().clone();
            if article_id_cursor.is_some() {
                state.article_id_cursor = article_id_cursor;
            }
            if date_cursor.is_some() {
                state.date_cursor = date_cursor;
            }
            let limit = limit.unwrap_or(settings.page_limit);
            let page = client
                .articles_with_limit(&state, limit)
                .await
                .map_err(map_client_error)?;
            out.articles("Лента", &page)?;
        }
        Command::Search { query } => {
            let mut search = SearchState::new();
            let (query, transition) = search
                .submit(history.current(), &query)
                .map_err(map_client_error)?;
            history.apply(&transition);
            save_history(&session_path, &history).context("не удалось сохранить сессию")?;

            let page = client.search(&query.query).await.map_err(map_client_error)?;
            search.on_success(&SearchState::key_for(&query), page.clone());
            out.articles(&format!("Найдено: {}", search.result_count()), &page)?;
        }
        Command::ClearSearch => {
            let mut search = SearchState::new();
            let transition = search.close(history.current());
            history.apply(&transition);
            save_history(&session_path, &history).context("не удалось сохранить сессию")?;

            let page = fetch_feed(&client, &transition.state, settings.page_limit).await?;
            out.articles(&format!("Поиск закрыт, найдено: {}", search.result_count()), &page)?;
        }
        Command::Days => {
            let page = client
                .day_counts(history.current())
                .await
                .map_err(map_client_error)?;
            out.days(&page)?;
        }
        Command::Day { date } => {
            let page = client
                .articles_by_day(&date)
                .await
                .map_err(map_client_error)?;
            if page.data.is_empty() && !out.json {
                println!("{}", empty_day_message(&date)?);
            } else {
                out.articles(&format!("Статьи за {date}"), &page)?;
            }
        }
        Command::TimeTravel { date } => {
            let transition =
                navigation::time_travel(history.current(), &date).map_err(map_client_error)?;
            history.apply(&transition);
            save_history(&session_path, &history).context("не удалось сохранить сессию")?;

            let page = fetch_feed(&client, &transition.state, settings.page_limit).await?;
            out.articles("Лента на дату", &page)?;
        }
        Command::Next { days: false } => {
            let current = fetch_feed(&client, history.current(), settings.page_limit).await?;
            let Some(transition) = navigation::load_more(history.current(), &current.pagination)
            else {
                return Err(anyhow!("это последняя страница ленты"));
            };
            history.apply(&transition);
            save_history(&session_path, &history).context("не удалось сохранить сессию")?;

            let page = fetch_feed(&client, &transition.state, settings.page_limit).await?;
            out.articles("Следующая страница", &page)?;
        }
        Command::Next { days: true } => {
            let current = client
                .day_counts(history.current())
                .await
                .map_err(map_client_error)?;
            let Some(transition) =
                navigation::load_more_days(history.current(), &current.pagination)
            else {
                return Err(anyhow!("это последняя страница сводки"));
            };
            history.apply(&transition);
            save_history(&session_path, &history).context("не удалось сохранить сессию")?;

            let page = client
                .day_counts(&transition.state)
                .await
                .map_err(map_client_error)?;
            out.days(&page)?;
        }
        Command::Prev { days } => {
            let state = go_back(&mut history, days)?;
            save_history(&session_path, &history).context("не удалось сохранить сессию")?;

            if days {
                let page = client.day_counts(&state).await.map_err(map_client_error)?;
                out.days(&page)?;
            } else {
                let page = fetch_feed(&client, &state, settings.page_limit).await?;
                out.articles("Предыдущая страница", &page)?;
            }
        }
        Command::State => {
            let query = history.current().to_query_string();
            println!("state: ?{query}");
            println!("history depth: {}", history.len());
        }
        Command::Reset => {
            clear_history(&session_path).context("не удалось удалить файл сессии")?;
            println!("Сессия сброшена");
        }
    }

    Ok(())
}

async fn fetch_feed(client: &FeedClient, state: &ViewState, limit: u32) -> Result<ArticlesPage> {
    debug!(key = %state.articles_key(), "fetching feed");
    client
        .articles_with_limit(state, limit)
        .await
        .map_err(map_client_error)
}

/// Шаг назад по истории; на первой странице кнопка «назад» недоступна.
fn go_back(history: &mut History, days: bool) -> Result<ViewState> {
    let enabled = if days {
        navigation::can_go_previous_days(history.current())
    } else {
        navigation::can_go_previous(history.current())
    };
    if !enabled {
        return Err(anyhow!("это первая страница"));
    }

    history
        .back()
        .cloned()
        .ok_or_else(|| anyhow!("история пуста"))
}

fn resolve_server(server: Option<String>, default: &str) -> String {
    let raw = server.unwrap_or_else(|| default.to_string());
    normalize_server(raw)
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn empty_day_message(date: &str) -> Result<String> {
    let day = feed_client::dates::format_date(date).map_err(map_client_error)?;
    Ok(format!("No Articles for {day}"))
}

fn map_client_error(err: FeedClientError) -> anyhow::Error {
    let message = match err {
        FeedClientError::Api { status, message } => format!("сервер ответил {status}: {message}"),
        FeedClientError::NotFound(message) => format!("ресурс не найден: {message}"),
        FeedClientError::InvalidDate(raw) => format!("некорректная дата: {raw:?}"),
        FeedClientError::InvalidRequest(message) => format!("некорректный запрос: {message}"),
        FeedClientError::Http(err) => format!("ошибка HTTP: {err}"),
    };
    anyhow!(message)
}

struct Output {
    json: bool,
}

impl Output {
    fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        let raw = serde_json::to_string_pretty(value).context("не удалось сериализовать ответ")?;
        println!("{raw}");
        Ok(())
    }

    fn articles(&self, title: &str, page: &ArticlesPage) -> Result<()> {
        if self.json {
            return self.print_json(page);
        }

        println!("{title} ({} шт.)", page.data.len());
        for article in &page.data {
            println!("{}", article_line(article));
        }
        if let Some(next) = page.pagination.next() {
            println!("next cursor: {next}");
        }
        Ok(())
    }

    fn days(&self, page: &DayCountPage) -> Result<()> {
        if self.json {
            return self.print_json(page);
        }

        match page.pagination.total_days {
            Some(total) => println!("Дней: {} из {total}", page.data.len()),
            None => println!("Дней: {}", page.data.len()),
        }
        for block in &page.data {
            let day = feed_client::dates::format_date(&block.date)
                .unwrap_or_else(|_| block.date.clone());
            println!("- {day}: {} articles", block.count);
        }
        if let Some(next) = page.pagination.next() {
            println!("next cursor: {next}");
        }
        Ok(())
    }
}

fn article_line(article: &Article) -> String {
    let author = article
        .author
        .as_ref()
        .map(|author| author.name.as_str())
        .unwrap_or("unknown");
    let mut line = format!(
        "- [{}] {} ({}, {}, {})",
        article.tag,
        article.title,
        author,
        format_day(&article.posted_at),
        article.read_duration
    );
    if let Some(href) = &article.href {
        line.push_str(&format!("\n    {href}"));
    }
    line.push_str(&format!("\n    image: {}", remove_search_params(&article.image_url)));
    line
}
