use clap::Parser;
use lucky_horoscope::adapters::source_from_config;
use lucky_horoscope::core::{picker, presenter};
use lucky_horoscope::core::session::{Completion, LookupSession};
use lucky_horoscope::core::{ConfigProvider, HoroscopeSource};
use lucky_horoscope::utils::error::{ErrorCategory, HoroscopeError};
use lucky_horoscope::utils::{logger, validation::Validate};
use lucky_horoscope::{CalendarDate, CliConfig, HoroscopeFetcher, TomlConfig};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Date(CalendarDate),
    Year(i32),
    Month(u32),
    Day(u32),
    Lookup,
    Retry,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    match line {
        "" | "go" | "확인" => return Some(Command::Lookup),
        "r" | "retry" | "다시" => return Some(Command::Retry),
        "q" | "quit" => return Some(Command::Quit),
        _ => {}
    }

    if let Ok(date) = chrono::NaiveDate::parse_from_str(line, "%Y-%m-%d") {
        return Some(Command::Date(CalendarDate::from(date)));
    }

    let (key, value) = line.split_once(char::is_whitespace)?;
    let value = value.trim();
    match key {
        "y" | "year" => value.parse().ok().map(Command::Year),
        "m" | "month" => value.parse().ok().map(Command::Month),
        "d" | "day" => value.parse().ok().map(Command::Day),
        _ => None,
    }
}

fn exit_code(category: ErrorCategory) -> i32 {
    match category {
        ErrorCategory::Fetch => 2,
        ErrorCategory::Parse | ErrorCategory::Lookup | ErrorCategory::Input => 1,
        ErrorCategory::Config => 3,
    }
}

fn fail(e: &HoroscopeError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(e.category()));
}

/// The year wheel only reaches back `picker::YEAR_SPAN` years.
fn check_year_window(date: CalendarDate, current_year: i32) -> Result<(), HoroscopeError> {
    if !picker::year_options(current_year).contains(&date.year()) {
        return Err(HoroscopeError::InvalidDateError {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        });
    }
    Ok(())
}

fn select_year(session: &mut LookupSession, year: i32) -> Result<(), HoroscopeError> {
    let candidate = session.selected().with_year(year)?;
    check_year_window(candidate, CalendarDate::today().year())?;
    session.select_date(candidate);
    Ok(())
}

fn select_date(session: &mut LookupSession, date: CalendarDate) -> Result<(), HoroscopeError> {
    check_year_window(date, CalendarDate::today().year())?;
    session.select_date(date);
    Ok(())
}

fn usage_hint(session: &LookupSession) -> String {
    let years = picker::year_options(CalendarDate::today().year());
    let months = picker::month_options();
    let selected = session.selected();
    let days = picker::day_options(selected.year(), selected.month());
    format!(
        "? YYYY-MM-DD | y <{}-{}> | m <{}-{}> | d <1-{}> | go | retry | quit",
        years.last().copied().unwrap_or_default(),
        years.first().copied().unwrap_or_default(),
        months.first().copied().unwrap_or_default(),
        months.last().copied().unwrap_or_default(),
        days.len()
    )
}

fn initial_session(cli: &CliConfig) -> Result<LookupSession, HoroscopeError> {
    let mut session = LookupSession::new(CalendarDate::today());
    if let Some(year) = cli.year {
        select_year(&mut session, year)?;
    }
    if let Some(month) = cli.month {
        session.select_month(month)?;
    }
    if let Some(day) = cli.day {
        session.select_day(day)?;
    }
    Ok(session)
}

async fn run<C: ConfigProvider + Validate>(cli: &CliConfig, config: C) -> anyhow::Result<()> {
    // 驗證配置
    if let Err(e) = config.validate() {
        fail(&e);
    }

    let mut session = match initial_session(cli) {
        Ok(session) => session,
        Err(e) => fail(&e),
    };

    // 建立來源與查詢器
    let source = source_from_config(&config);
    tracing::info!("📁 Horoscope document: {}", source.describe());
    let fetcher = HoroscopeFetcher::with_policy(source, config.bucket_policy());

    if !cli.interactive {
        match session.lookup(&fetcher).await {
            Completion::Applied | Completion::Stale => {
                println!("{}", presenter::render_session(&session));
            }
            Completion::Failed(notice) => {
                tracing::error!("{}", notice.detail);
                eprintln!("{}", presenter::render_notice(&notice));
                std::process::exit(exit_code(notice.category));
            }
        }
        return Ok(());
    }

    println!("{}", presenter::render_session(&session));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(command) = parse_command(&line) else {
            eprintln!("{}", usage_hint(&session));
            continue;
        };

        let selection = match command {
            Command::Quit => break,
            Command::Date(date) => select_date(&mut session, date),
            Command::Year(year) => select_year(&mut session, year),
            Command::Month(month) => session.select_month(month),
            Command::Day(day) => session.select_day(day),
            Command::Retry => {
                session.retry();
                Ok(())
            }
            Command::Lookup => {
                if let Completion::Failed(notice) = session.lookup(&fetcher).await {
                    eprintln!("{}", presenter::render_notice(&notice));
                }
                Ok(())
            }
        };

        if let Err(e) = selection {
            eprintln!("❌ {}", e.user_friendly_message());
        }
        println!("{}", presenter::render_session(&session));
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting lucky-horoscope");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let mut config = match TomlConfig::from_file(path) {
                Ok(config) => config,
                Err(e) => fail(&e),
            };
            config.apply_overrides(&cli);
            run(&cli, config).await
        }
        None => run(&cli, cli.clone()).await,
    }
}
