use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use fleet_core::*;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "mgps")]
#[command(about = "Fleet incident event log for GPS monitoring", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Default log level (RUST_LOG takes precedence)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive event log session (default)
    Session,

    /// Print the indicator catalog and exit
    Indicators,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    fleet_core::logging::init_with_level(&cli.log_level);

    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Some(Commands::Indicators) => cmd_indicators(&config),
        Some(Commands::Session) | None => cmd_session(&config),
    }
}

fn cmd_indicators(config: &Config) -> Result<()> {
    let mut catalog = build_default_catalog();
    for label in &config.indicators.extra {
        catalog.add(label.clone());
    }

    for (i, label) in catalog.iter().enumerate() {
        println!("{:>3}. {}", i + 1, label);
    }
    Ok(())
}

fn cmd_session(config: &Config) -> Result<()> {
    let mut session = Session::new(config);

    println!("╭──────────────────────────────────────────────╮");
    println!("│   Cuadro de Eventos - Monitoreo GPS          │");
    println!("╰──────────────────────────────────────────────╯");
    println!("Escribe 'help' para ver los comandos disponibles.");
    println!();

    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        let line = match prompt(&mut input, "mgps> ")? {
            Some(line) => line,
            None => break, // EOF ends the session
        };

        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word {
            "" => continue,
            "help" | "?" => print_help(),
            "add" | "a" => cmd_add(&mut session, &mut input)?,
            "list" | "ls" => {
                print_table(&session.filter(&FieldFilter::All, &FieldFilter::All))
            }
            "filter" | "f" => cmd_filter(&session, &mut input)?,
            "delete" | "rm" => cmd_delete(&mut session, &mut input)?,
            "counts" | "c" => print_counts(&session),
            "catalog" => {
                if rest.is_empty() {
                    for (i, label) in session.catalog().iter().enumerate() {
                        println!("{:>3}. {}", i + 1, label);
                    }
                } else if session.add_indicator(rest) {
                    println!("Indicador agregado: {}", rest);
                } else {
                    println!("Ese indicador ya existe en el catálogo.");
                }
            }
            "export" => {
                if rest.is_empty() {
                    println!("Uso: export <archivo.csv>");
                } else {
                    cmd_export(&session, Path::new(rest))?;
                }
            }
            "json" => {
                let dump = serde_json::to_string_pretty(session.store().events())
                    .map_err(|e| Error::Other(format!("JSON error: {}", e)))?;
                println!("{}", dump);
            }
            "quit" | "exit" | "q" => break,
            other => {
                println!("Comando desconocido: '{}'. Escribe 'help'.", other);
            }
        }
    }

    tracing::info!(events = session.store().len(), "session ended");
    Ok(())
}

fn print_help() {
    println!("Comandos:");
    println!("  add       Registrar un nuevo evento");
    println!("  list      Mostrar todos los eventos registrados");
    println!("  filter    Mostrar eventos filtrados por unidad e indicador");
    println!("  delete    Eliminar un evento (pide confirmación)");
    println!("  counts    Totales por indicador");
    println!("  catalog   Ver el catálogo; 'catalog <nombre>' agrega un indicador");
    println!("  export    Exportar la tabla a CSV: export <archivo.csv>");
    println!("  json      Volcar los eventos como JSON");
    println!("  quit      Terminar la sesión");
}

/// Add-event form: one prompt per field, speed only for speeding events.
///
/// Validation lives in the core; invalid submissions are reported and leave
/// the log untouched. EOF mid-form abandons it.
fn cmd_add(session: &mut Session, input: &mut impl BufRead) -> Result<()> {
    println!(
        "Número de reporte: {} (se asigna al guardar)",
        session.next_report_number()
    );

    let date = match prompt(input, "Fecha [hoy, AAAA-MM-DD]: ")? {
        Some(text) => parse_date(&text),
        None => return Ok(()),
    };

    println!("Indicadores:");
    for (i, label) in session.catalog().iter().enumerate() {
        println!("{:>3}. {}", i + 1, label);
    }
    let indicator = match prompt(input, "Indicador (número o nombre): ")? {
        Some(text) => resolve_indicator(session, &text),
        None => return Ok(()),
    };

    let unit = match prompt(input, "Unidad: ")? {
        Some(text) => text,
        None => return Ok(()),
    };
    let driver = match prompt(input, "Conductor: ")? {
        Some(text) => text,
        None => return Ok(()),
    };

    let speed_kmh = if indicator == SPEEDING_INDICATOR {
        match prompt(input, "Velocidad (km/h): ")? {
            Some(text) => text.trim().parse::<u32>().ok(),
            None => return Ok(()),
        }
    } else {
        None
    };

    let location = match prompt(input, "Ubicación: ")? {
        Some(text) => text,
        None => return Ok(()),
    };
    let description = match prompt(input, "Descripción: ")? {
        Some(text) => text,
        None => return Ok(()),
    };

    let draft = EventDraft {
        date,
        indicator,
        unit,
        driver,
        speed_kmh,
        location,
        description,
    };

    match session.add_event(draft) {
        Ok(event) => println!("Evento agregado ✅ (Reporte {})", event.report_number),
        Err(e) => println!("Error: {}", e),
    }

    Ok(())
}

fn cmd_filter(session: &Session, input: &mut impl BufRead) -> Result<()> {
    let units = session.store().distinct_units();
    if !units.is_empty() {
        println!("Unidades registradas: {}", units.join(", "));
    }

    let unit = match prompt(input, "Filtrar por unidad [todas]: ")? {
        Some(text) => FieldFilter::parse(&text),
        None => return Ok(()),
    };
    let indicator = match prompt(input, "Filtrar por indicador [todos]: ")? {
        Some(text) => FieldFilter::parse(&text),
        None => return Ok(()),
    };

    print_table(&session.filter(&unit, &indicator));
    Ok(())
}

/// Two-phase delete: pick a row, confirm or cancel. The pending state lives
/// in the session; EOF counts as cancel.
fn cmd_delete(session: &mut Session, input: &mut impl BufRead) -> Result<()> {
    if session.store().is_empty() {
        println!("No hay eventos registrados.");
        return Ok(());
    }

    for (i, event) in session.store().iter().enumerate() {
        println!("{} - {}", i + 1, event.report_number);
    }

    let selection = match prompt(input, "Selecciona evento a eliminar (número): ")? {
        Some(text) => text,
        None => return Ok(()),
    };
    let index = match selection.trim().parse::<usize>() {
        Ok(n) if n >= 1 => n - 1,
        _ => {
            println!("Selección inválida.");
            return Ok(());
        }
    };

    let summary = match session.request_delete(index) {
        Some(event) => format!(
            "Reporte: {} | Fecha: {} | Unidad: {} | Indicador: {}",
            event.report_number, event.date, event.unit, event.indicator
        ),
        None => {
            println!("No existe ese evento.");
            return Ok(());
        }
    };

    println!("¿Seguro que quieres eliminar este evento?");
    println!("  {}", summary);

    match prompt(input, "Confirmar [s/N]: ")? {
        Some(answer) if matches!(answer.trim().to_lowercase().as_str(), "s" | "si" | "sí") => {
            session.confirm_delete();
            println!("Evento eliminado ❌");
        }
        _ => {
            session.cancel_delete();
            println!("Eliminación cancelada");
        }
    }

    Ok(())
}

fn cmd_export(session: &Session, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;

    for event in session.store().iter() {
        writer.serialize(CsvRow::from(event)).map_err(csv_error)?;
    }
    writer.flush()?;

    println!(
        "Tabla exportada: {} eventos en {}",
        session.store().len(),
        path.display()
    );
    Ok(())
}

/// A row of the exported table, with the original report column headers
#[derive(serde::Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Número de reporte")]
    report_number: String,
    #[serde(rename = "Fecha")]
    date: String,
    #[serde(rename = "Indicador")]
    indicator: &'a str,
    #[serde(rename = "Unidad")]
    unit: &'a str,
    #[serde(rename = "Conductor")]
    driver: &'a str,
    #[serde(rename = "Km/h")]
    speed_kmh: Option<u32>,
    #[serde(rename = "Ubicación")]
    location: &'a str,
    #[serde(rename = "Descripción")]
    description: &'a str,
}

impl<'a> From<&'a Event> for CsvRow<'a> {
    fn from(event: &'a Event) -> Self {
        CsvRow {
            report_number: event.report_number.to_string(),
            date: event.date.to_string(),
            indicator: &event.indicator,
            unit: &event.unit,
            driver: &event.driver,
            speed_kmh: event.speed_kmh,
            location: &event.location,
            description: &event.description,
        }
    }
}

fn csv_error(e: csv::Error) -> Error {
    Error::Other(format!("CSV error: {}", e))
}

fn print_table(events: &[&Event]) {
    if events.is_empty() {
        println!("No hay eventos para mostrar con los filtros seleccionados.");
        return;
    }

    println!(
        "{:<12} {:<10} {:<38} {:<10} {:<14} {:>5} {:<20} {}",
        "Reporte", "Fecha", "Indicador", "Unidad", "Conductor", "Km/h", "Ubicación", "Descripción"
    );
    for event in events {
        let speed = event
            .speed_kmh
            .map(|v| v.to_string())
            .unwrap_or_default();
        println!(
            "{:<12} {:<10} {:<38} {:<10} {:<14} {:>5} {:<20} {}",
            event.report_number.to_string(),
            event.date.to_string(),
            event.indicator,
            event.unit,
            event.driver,
            speed,
            event.location,
            event.description
        );
    }
}

fn print_counts(session: &Session) {
    println!("╭──────────────────────────────────────────────╮");
    println!("│  Indicadores Totales                         │");
    println!("╰──────────────────────────────────────────────╯");
    for (label, count) in session.indicator_counts() {
        println!("  {:<40} {:>4}", label, count);
    }
}

/// Parse a form date; empty input means today, anything unparseable falls
/// back to today with a notice (the log accepts arbitrary dates).
fn parse_date(text: &str) -> NaiveDate {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Local::now().date_naive();
    }
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => {
            println!("Fecha inválida, se usa la fecha de hoy.");
            Local::now().date_naive()
        }
    }
}

/// Map a form answer to an indicator label: a number picks from the listed
/// catalog, anything else is taken verbatim (the core validates it).
fn resolve_indicator(session: &Session, text: &str) -> String {
    let trimmed = text.trim();
    if let Ok(n) = trimmed.parse::<usize>() {
        if n >= 1 {
            if let Some(label) = session.catalog().labels().get(n - 1) {
                return label.clone();
            }
        }
    }
    trimmed.to_string()
}

fn prompt(input: &mut impl BufRead, text: &str) -> Result<Option<String>> {
    print!("{}", text);
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
}
