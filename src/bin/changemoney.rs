//! CLI binary for the exchange order desk.
#![allow(
    clippy::exit,
    reason = "CLI binary uses process::exit for fatal errors"
)]

use std::io::{self, Write as _};
use std::path::PathBuf;
use std::process::ExitCode;

use changemoney_rs::admin::{AdminGate, AdminSession};
use changemoney_rs::client::RemoteBlockingClient;
use changemoney_rs::desk::{CONTACT_URL, MIN_ORDER_TOTAL, OrderDeskBlocking};
use changemoney_rs::error::ChangeMoneyError;
use changemoney_rs::export;
use changemoney_rs::fees::{FEE_TABLE, format_vnd};
use changemoney_rs::models::{Order, OrderDraft, OrderId, OrderStatus};
use changemoney_rs::stats::DeskStats;
use changemoney_rs::storage::{
    BlockingOrderStore, FallbackStore, FileStore, RemoteBlockingStore,
};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

/// Environment variable holding the expected admin password.
const PASSWORD_ENV: &str = "CHANGEMONEY_ADMIN_PASSWORD";

/// Environment variable selecting the remote blob store base URL.
const REMOTE_URL_ENV: &str = "CHANGEMONEY_REMOTE_URL";

/// Environment variable holding the remote blob store token.
const TOKEN_ENV: &str = "CHANGEMONEY_TOKEN";

/// Exchange order desk CLI — place, manage, and export cash orders.
#[derive(Debug, Parser)]
#[command(name = "changemoney", version, about)]
struct Cli {
    /// Override the storage directory (default: XDG data dir).
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Show the denomination table with fee rates.
    Rates,
    /// Place a new exchange order.
    Order(OrderArgs),
    /// List all orders (admin).
    List(AdminArgs),
    /// Mark an order completed (admin).
    Complete {
        /// Admin password.
        #[command(flatten)]
        admin: AdminArgs,
        /// Id of the order to complete.
        id: String,
    },
    /// Move an order back to pending (admin).
    Reopen {
        /// Admin password.
        #[command(flatten)]
        admin: AdminArgs,
        /// Id of the order to reopen.
        id: String,
    },
    /// Delete every order (admin). Refuses without --yes.
    Clear {
        /// Admin password.
        #[command(flatten)]
        admin: AdminArgs,
        /// Confirm the wipe; there is no undo.
        #[arg(long)]
        yes: bool,
    },
    /// Export all orders to a spreadsheet (admin).
    Export {
        /// Admin password.
        #[command(flatten)]
        admin: AdminArgs,
        /// Output path (default: dated file name in the current dir).
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Show order statistics (admin).
    Stats(AdminArgs),
}

/// Admin password argument shared by the gated subcommands.
#[derive(Debug, Args)]
struct AdminArgs {
    /// Admin password, checked against the configured value.
    #[arg(long)]
    password: String,
}

/// Arguments for the `order` subcommand.
#[derive(Debug, Args)]
struct OrderArgs {
    /// Face value to exchange, in minor units (e.g. 500000).
    #[arg(long)]
    denomination: i64,
    /// Number of notes. Anything that is not a positive integer
    /// counts as 1.
    #[arg(long, default_value = "1", value_parser = parse_quantity)]
    quantity: u32,
    /// Customer name.
    #[arg(long)]
    name: String,
    /// Contact phone number.
    #[arg(long)]
    phone: String,
    /// Delivery address.
    #[arg(long)]
    address: String,
    /// Optional free-text note.
    #[arg(long, default_value = "")]
    note: String,
}

/// Parses a quantity for clap, coercing invalid input to 1.
#[allow(
    clippy::unnecessary_wraps,
    reason = "clap value parsers must return Result"
)]
fn parse_quantity(raw: &str) -> Result<u32, String> {
    Ok(OrderDraft::coerce_quantity(raw))
}

/// Reads a non-empty environment variable.
fn read_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

/// Checks the admin password against the configured value.
///
/// Returns `Ok(Some(session))` when the gate passes, `Ok(None)` with
/// the failure already printed otherwise.
fn admin_login(attempt: &str) -> io::Result<Option<AdminSession>> {
    let Some(expected) = read_env(PASSWORD_ENV) else {
        let mut err = io::stderr().lock();
        writeln!(
            err,
            "{} {} environment variable is not set",
            "error:".red().bold(),
            PASSWORD_ENV.bold()
        )?;
        writeln!(
            err,
            "  {} create a .env file with {}=<admin password>",
            "hint:".cyan(),
            PASSWORD_ENV
        )?;
        return Ok(None);
    };
    match AdminGate::new(expected).login(attempt) {
        Ok(session) => Ok(Some(session)),
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} {err}",
                "error:".red().bold()
            )?;
            Ok(None)
        }
    }
}

/// Creates the file store, using `data_dir` if provided or the default
/// XDG data directory otherwise.
fn create_store(data_dir: Option<PathBuf>) -> changemoney_rs::error::Result<FileStore> {
    let dir = match data_dir {
        Some(dir) => dir,
        None => FileStore::default_dir()?,
    };
    FileStore::new(dir)
}

/// Builds the remote store when both remote env vars are set.
fn create_remote_store() -> changemoney_rs::error::Result<Option<RemoteBlockingStore>> {
    let Some((base_url, token)) = read_env(REMOTE_URL_ENV).zip(read_env(TOKEN_ENV)) else {
        return Ok(None);
    };
    let client = RemoteBlockingClient::builder()
        .base_url(base_url)
        .token(token)
        .build()?;
    Ok(Some(RemoteBlockingStore::new(client)))
}

/// Runs the CLI, returning an appropriate exit code.
fn run() -> io::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let _dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    let file_store = match create_store(cli.data_dir) {
        Ok(store) => store,
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to initialize storage: {err}",
                "error:".red().bold()
            )?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let remote_store = match create_remote_store() {
        Ok(remote) => remote,
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to build remote store: {err}",
                "error:".red().bold()
            )?;
            return Ok(ExitCode::FAILURE);
        }
    };

    // Remote (with local fallback) when configured, plain file store
    // otherwise. Both paths share the generic dispatcher.
    match remote_store {
        Some(remote) => {
            let desk = match OrderDeskBlocking::builder()
                .storage(FallbackStore::new(remote, file_store))
                .build()
            {
                Ok(desk) => desk,
                Err(err) => {
                    writeln!(
                        io::stderr().lock(),
                        "{} failed to build desk: {err}",
                        "error:".red().bold()
                    )?;
                    return Ok(ExitCode::FAILURE);
                }
            };
            dispatch(&desk, cli.command)
        }
        None => {
            let desk = match OrderDeskBlocking::builder().storage(file_store).build() {
                Ok(desk) => desk,
                Err(err) => {
                    writeln!(
                        io::stderr().lock(),
                        "{} failed to build desk: {err}",
                        "error:".red().bold()
                    )?;
                    return Ok(ExitCode::FAILURE);
                }
            };
            dispatch(&desk, cli.command)
        }
    }
}

/// Dispatches to the appropriate subcommand handler.
fn dispatch<S: BlockingOrderStore>(
    desk: &OrderDeskBlocking<S>,
    command: Command,
) -> io::Result<ExitCode> {
    match command {
        Command::Rates => cmd_rates(),
        Command::Order(args) => cmd_order(desk, &args),
        Command::List(admin) => gated(&admin, || cmd_list(desk)),
        Command::Complete { admin, id } => {
            gated(&admin, || cmd_set_status(desk, &id, OrderStatus::Completed))
        }
        Command::Reopen { admin, id } => {
            gated(&admin, || cmd_set_status(desk, &id, OrderStatus::Pending))
        }
        Command::Clear { admin, yes } => gated(&admin, || cmd_clear(desk, yes)),
        Command::Export { admin, output } => gated(&admin, || cmd_export(desk, output)),
        Command::Stats(admin) => gated(&admin, || cmd_stats(desk)),
    }
}

/// Runs an admin handler behind the password gate.
fn gated<F>(admin: &AdminArgs, handler: F) -> io::Result<ExitCode>
where
    F: FnOnce() -> io::Result<ExitCode>,
{
    let Some(session) = admin_login(&admin.password)? else {
        return Ok(ExitCode::FAILURE);
    };
    let code = handler()?;
    session.logout();
    Ok(code)
}

/// Executes the `rates` subcommand: prints the denomination table.
fn cmd_rates() -> io::Result<ExitCode> {
    let mut out = io::stdout().lock();
    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Denomination").fg(Color::Cyan),
        Cell::new("Fee").fg(Color::Cyan),
    ]);
    for denom in &FEE_TABLE {
        _ = table.add_row(vec![
            Cell::new(denom.label),
            Cell::new(format!("{}%", denom.rate.percent_rounded())),
        ]);
    }
    writeln!(out, "{}", "Exchange Rates".green().bold())?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    writeln!(
        out,
        "{}",
        format_args!("Minimum order: {}", format_vnd(MIN_ORDER_TOTAL)).dimmed()
    )?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `order` subcommand: validates and places an order.
fn cmd_order<S: BlockingOrderStore>(
    desk: &OrderDeskBlocking<S>,
    args: &OrderArgs,
) -> io::Result<ExitCode> {
    let draft = OrderDraft {
        denomination: args.denomination,
        quantity: args.quantity,
        customer_name: args.name.clone(),
        phone_number: args.phone.clone(),
        address: args.address.clone(),
        note: args.note.clone(),
    };

    match desk.place(&draft) {
        Ok(order) => {
            print_placed_order(&order)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(ChangeMoneyError::Validation(issues)) => {
            let mut err = io::stderr().lock();
            writeln!(err, "{} order rejected:", "error:".red().bold())?;
            // One line per failing condition.
            for issue in issues {
                writeln!(err, "  \u{2022} {issue}")?;
            }
            Ok(ExitCode::FAILURE)
        }
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to save order: {err}",
                "error:".red().bold()
            )?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes the `list` subcommand: prints all orders.
fn cmd_list<S: BlockingOrderStore>(desk: &OrderDeskBlocking<S>) -> io::Result<ExitCode> {
    let spinner = make_spinner("Loading orders...");
    let result = desk.orders();
    spinner.finish_and_clear();

    match result {
        Ok(orders) => {
            print_orders_table(&orders)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to read orders: {err}",
                "error:".red().bold()
            )?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes `complete`/`reopen`: sets an order's status.
fn cmd_set_status<S: BlockingOrderStore>(
    desk: &OrderDeskBlocking<S>,
    id: &str,
    status: OrderStatus,
) -> io::Result<ExitCode> {
    let order_id = OrderId::new(id.to_owned());
    match desk.update_status(&order_id, status) {
        Ok(order) => {
            writeln!(
                io::stdout().lock(),
                "{} order {} is now {}",
                "ok:".green().bold(),
                order.id.as_inner().bold(),
                order.status
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err @ ChangeMoneyError::NotFound(_)) => {
            writeln!(io::stderr().lock(), "{} {err}", "error:".red().bold())?;
            Ok(ExitCode::FAILURE)
        }
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to update order: {err}",
                "error:".red().bold()
            )?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes the `clear` subcommand: wipes the store after explicit
/// confirmation.
fn cmd_clear<S: BlockingOrderStore>(
    desk: &OrderDeskBlocking<S>,
    yes: bool,
) -> io::Result<ExitCode> {
    if !yes {
        let mut err = io::stderr().lock();
        writeln!(
            err,
            "{} this deletes ALL orders and cannot be undone",
            "refusing:".yellow().bold()
        )?;
        writeln!(err, "  {} re-run with --yes to confirm", "hint:".cyan())?;
        return Ok(ExitCode::FAILURE);
    }

    match desk.clear() {
        Ok(()) => {
            writeln!(
                io::stdout().lock(),
                "{} all orders deleted",
                "ok:".green().bold()
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to clear orders: {err}",
                "error:".red().bold()
            )?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes the `export` subcommand: writes the spreadsheet file.
fn cmd_export<S: BlockingOrderStore>(
    desk: &OrderDeskBlocking<S>,
    output: Option<PathBuf>,
) -> io::Result<ExitCode> {
    let spinner = make_spinner("Exporting orders...");
    let result = desk
        .orders()
        .and_then(|orders| export::write_workbook(&orders));
    spinner.finish_and_clear();

    let bytes = match result {
        Ok(bytes) => bytes,
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} export failed: {err}",
                "error:".red().bold()
            )?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let path = output
        .unwrap_or_else(|| PathBuf::from(export::file_name(Local::now().date_naive())));
    std::fs::write(&path, bytes)?;
    writeln!(
        io::stdout().lock(),
        "{} wrote {}",
        "ok:".green().bold(),
        path.display().bold()
    )?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `stats` subcommand: prints dashboard figures.
fn cmd_stats<S: BlockingOrderStore>(desk: &OrderDeskBlocking<S>) -> io::Result<ExitCode> {
    match desk.stats() {
        Ok(stats) => {
            print_stats_table(&stats)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to compute stats: {err}",
                "error:".red().bold()
            )?;
            Ok(ExitCode::FAILURE)
        }
    }
}

// ── Output formatting ────────────────────────────────────────────────

/// Prints the confirmation and contact handoff after a placement.
fn print_placed_order(order: &Order) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(
        out,
        "{} order {} saved",
        "ok:".green().bold(),
        order.id.as_inner().bold()
    )?;
    writeln!(out)?;
    writeln!(out, "  {} {}", "Subtotal:".bold(), order.subtotal_formatted)?;
    writeln!(
        out,
        "  {} {} ({}%)",
        "Fee:".bold(),
        order.fee_formatted,
        order.fee_percentage
    )?;
    writeln!(out, "  {} {}", "Total:".bold(), order.total_formatted)?;
    writeln!(out)?;
    writeln!(
        out,
        "{} {}",
        "Contact us to arrange delivery:".green(),
        CONTACT_URL.bold()
    )?;
    Ok(())
}

/// Prints orders in a table.
fn print_orders_table(orders: &[Order]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    if orders.is_empty() {
        writeln!(out, "{}", "No orders found.".dimmed())?;
        return Ok(());
    }

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Id").fg(Color::Cyan),
        Cell::new("Created").fg(Color::Cyan),
        Cell::new("Customer").fg(Color::Cyan),
        Cell::new("Phone").fg(Color::Cyan),
        Cell::new("Denomination").fg(Color::Cyan),
        Cell::new("Qty").fg(Color::Cyan),
        Cell::new("Total").fg(Color::Cyan),
        Cell::new("Status").fg(Color::Cyan),
    ]);

    for order in orders {
        let status_cell = match order.status {
            OrderStatus::Pending => Cell::new(order.status.label()).fg(Color::Yellow),
            OrderStatus::Completed => Cell::new(order.status.label()).fg(Color::Green),
        };
        _ = table.add_row(vec![
            Cell::new(order.id.as_inner()),
            Cell::new(&order.created_at),
            Cell::new(&order.customer_name),
            Cell::new(&order.phone_number),
            Cell::new(&order.denomination_label),
            Cell::new(order.quantity),
            Cell::new(&order.total_formatted),
            status_cell,
        ]);
    }

    writeln!(
        out,
        "{} {}",
        "Orders".green().bold(),
        format_args!("({})", orders.len()).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Prints the statistics table.
fn print_stats_table(stats: &DeskStats) -> io::Result<()> {
    let mut out = io::stdout().lock();

    let completion = (stats.completion_rate() * 100.0).round();
    let profit = (stats.profit_rate() * 100.0).round();

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Figure").fg(Color::Cyan),
        Cell::new("Value").fg(Color::Cyan),
    ]);
    let rows: &[(&str, String)] = &[
        ("Orders", stats.total_orders.to_string()),
        ("Completed", stats.completed_orders.to_string()),
        ("Pending", stats.pending_orders.to_string()),
        ("Revenue (all orders)", format_vnd(stats.total_revenue)),
        ("Delivered (completed)", format_vnd(stats.delivered_subtotal)),
        ("Fees earned (completed)", format_vnd(stats.completed_fees)),
        ("Completion rate", format!("{completion}%")),
        ("Profit rate", format!("{profit}%")),
    ];
    for (name, value) in rows {
        _ = table.add_row(vec![Cell::new(name), Cell::new(value)]);
    }

    writeln!(out, "{}", "Order Statistics".green().bold())?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Creates a spinner with the given message.
fn make_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_owned());
    spinner.enable_steady_tick(core::time::Duration::from_millis(80));
    spinner
}

/// Entry point.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            // Last-resort error output — if stderr itself failed, nothing
            // we can do.
            let _ignored = writeln!(io::stderr(), "fatal I/O error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use changemoney_rs::storage::InMemoryStore;

    /// Compares exit codes through their debug form (ExitCode has no
    /// `PartialEq`).
    fn assert_code(actual: ExitCode, expected: ExitCode) {
        assert_eq!(format!("{actual:?}"), format!("{expected:?}"));
    }

    /// Builds a desk over a fresh in-memory store.
    fn mock_desk() -> OrderDeskBlocking<InMemoryStore> {
        OrderDeskBlocking::builder()
            .storage(InMemoryStore::new())
            .build()
            .unwrap()
    }

    /// Order args that pass every intake check.
    fn valid_args() -> OrderArgs {
        OrderArgs {
            denomination: 500_000,
            quantity: 2,
            name: "Nguyễn Văn A".to_owned(),
            phone: "0901234567".to_owned(),
            address: "12 Lý Thường Kiệt, Hà Nội".to_owned(),
            note: String::new(),
        }
    }

    /// Places one valid order and returns it.
    fn place_one(desk: &OrderDeskBlocking<InMemoryStore>) -> Order {
        let draft = OrderDraft {
            denomination: 500_000,
            quantity: 2,
            customer_name: "Nguyễn Văn A".to_owned(),
            phone_number: "0901234567".to_owned(),
            address: "12 Lý Thường Kiệt, Hà Nội".to_owned(),
            note: String::new(),
        };
        desk.place(&draft).unwrap()
    }

    // ── parse_quantity tests ──────────────────────────────────────────

    #[test]
    fn parse_quantity_positive() {
        assert_eq!(parse_quantity("7").unwrap(), 7);
    }

    #[test]
    fn parse_quantity_coerces_garbage_to_one() {
        assert_eq!(parse_quantity("abc").unwrap(), 1);
        assert_eq!(parse_quantity("0").unwrap(), 1);
        assert_eq!(parse_quantity("-3").unwrap(), 1);
    }

    // ── create_store tests ────────────────────────────────────────────

    #[test]
    fn create_store_with_custom_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = create_store(Some(dir.path().to_path_buf()));
        assert!(store.is_ok());
    }

    #[test]
    fn create_store_with_default_dir() {
        let store = create_store(None);
        assert!(store.is_ok());
    }

    // ── cmd_order tests ───────────────────────────────────────────────

    #[test]
    fn cmd_order_valid_succeeds_and_persists() {
        let desk = mock_desk();
        let code = cmd_order(&desk, &valid_args()).unwrap();
        assert_code(code, ExitCode::SUCCESS);
        assert_eq!(desk.orders().unwrap().len(), 1);
    }

    #[test]
    fn cmd_order_invalid_fails_and_persists_nothing() {
        let desk = mock_desk();
        let args = OrderArgs {
            name: String::new(),
            ..valid_args()
        };
        let code = cmd_order(&desk, &args).unwrap();
        assert_code(code, ExitCode::FAILURE);
        assert!(desk.orders().unwrap().is_empty());
    }

    #[test]
    fn cmd_order_below_minimum_fails() {
        let desk = mock_desk();
        let args = OrderArgs {
            denomination: 10_000,
            quantity: 1,
            ..valid_args()
        };
        let code = cmd_order(&desk, &args).unwrap();
        assert_code(code, ExitCode::FAILURE);
    }

    // ── cmd_list tests ────────────────────────────────────────────────

    #[test]
    fn cmd_list_empty() {
        let desk = mock_desk();
        let code = cmd_list(&desk).unwrap();
        assert_code(code, ExitCode::SUCCESS);
    }

    #[test]
    fn cmd_list_with_data() {
        let desk = mock_desk();
        let _order = place_one(&desk);
        let code = cmd_list(&desk).unwrap();
        assert_code(code, ExitCode::SUCCESS);
    }

    // ── cmd_set_status tests ──────────────────────────────────────────

    #[test]
    fn cmd_set_status_completes_an_order() {
        let desk = mock_desk();
        let order = place_one(&desk);
        let code = cmd_set_status(&desk, order.id.as_inner(), OrderStatus::Completed).unwrap();
        assert_code(code, ExitCode::SUCCESS);
        let stored = desk.orders().unwrap();
        assert_eq!(stored.first().map(|o| o.status), Some(OrderStatus::Completed));
    }

    #[test]
    fn cmd_set_status_unknown_id_fails() {
        let desk = mock_desk();
        let code = cmd_set_status(&desk, "missing", OrderStatus::Completed).unwrap();
        assert_code(code, ExitCode::FAILURE);
    }

    // ── cmd_clear tests ───────────────────────────────────────────────

    #[test]
    fn cmd_clear_refuses_without_confirmation() {
        let desk = mock_desk();
        let _order = place_one(&desk);
        let code = cmd_clear(&desk, false).unwrap();
        assert_code(code, ExitCode::FAILURE);
        assert_eq!(desk.orders().unwrap().len(), 1);
    }

    #[test]
    fn cmd_clear_with_confirmation_wipes() {
        let desk = mock_desk();
        let _order = place_one(&desk);
        let code = cmd_clear(&desk, true).unwrap();
        assert_code(code, ExitCode::SUCCESS);
        assert!(desk.orders().unwrap().is_empty());
    }

    // ── cmd_export tests ──────────────────────────────────────────────

    #[test]
    fn cmd_export_writes_the_file() {
        let desk = mock_desk();
        let _order = place_one(&desk);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.xlsx");
        let code = cmd_export(&desk, Some(path.clone())).unwrap();
        assert_code(code, ExitCode::SUCCESS);
        assert!(path.exists());
    }

    // ── cmd_stats / cmd_rates tests ───────────────────────────────────

    #[test]
    fn cmd_stats_on_empty_store() {
        let desk = mock_desk();
        let code = cmd_stats(&desk).unwrap();
        assert_code(code, ExitCode::SUCCESS);
    }

    #[test]
    fn cmd_rates_prints_table() {
        let code = cmd_rates().unwrap();
        assert_code(code, ExitCode::SUCCESS);
    }

    // ── print function tests ──────────────────────────────────────────

    #[test]
    fn print_orders_table_empty() {
        assert!(print_orders_table(&[]).is_ok());
    }

    #[test]
    fn print_orders_table_with_data() {
        let desk = mock_desk();
        let order = place_one(&desk);
        assert!(print_orders_table(&[order]).is_ok());
    }

    #[test]
    fn print_stats_table_works() {
        let stats = DeskStats::default();
        assert!(print_stats_table(&stats).is_ok());
    }

    #[test]
    fn print_placed_order_works() {
        let desk = mock_desk();
        let order = place_one(&desk);
        assert!(print_placed_order(&order).is_ok());
    }

    // ── make_spinner test ─────────────────────────────────────────────

    #[test]
    fn make_spinner_creates_spinner() {
        let spinner = make_spinner("Testing...");
        spinner.finish_and_clear();
    }

    // ── dispatch tests ────────────────────────────────────────────────

    #[test]
    fn dispatch_rates() {
        let desk = mock_desk();
        let code = dispatch(&desk, Command::Rates).unwrap();
        assert_code(code, ExitCode::SUCCESS);
    }

    #[test]
    fn dispatch_order() {
        let desk = mock_desk();
        let code = dispatch(&desk, Command::Order(valid_args())).unwrap();
        assert_code(code, ExitCode::SUCCESS);
    }
}
