use anyhow::{bail, Result};
use std::env;
use std::path::Path;

// Use library instead of local modules
use realty_engine::{calculate, Catalog, ListingView, LoanForm};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("calc") => run_calc(&args[2..]),
        Some("listings") => {
            let path = args
                .get(2)
                .map(String::as_str)
                .ok_or_else(|| anyhow::anyhow!("Usage: realty-engine listings <file.json|file.csv>"))?;
            run_ui_mode(load_catalog(path)?)
        }
        _ => run_ui_mode(Catalog::from_sample()),
    }
}

/// Load a listing catalog, picking the format from the file extension.
fn load_catalog(path: &str) -> Result<Catalog> {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    match ext {
        "json" => Catalog::from_json_file(path),
        "csv" => Catalog::from_csv_file(path),
        other => bail!("Unsupported listings format '{}' (expected .json or .csv)", other),
    }
}

/// Calculator mode: positional values in, six formatted figures out.
///
/// Missing or malformed arguments fall back to the form defaults (0, with
/// 25-year amortization), same as leaving a field blank.
fn run_calc(args: &[String]) -> Result<()> {
    let form = LoanForm {
        home_price: args.first().cloned(),
        down_payment: args.get(1).cloned(),
        interest_rate: args.get(2).cloned(),
        amortization: args.get(3).cloned(),
        property_tax: args.get(4).cloned(),
        insurance: args.get(5).cloned(),
    };

    let params = form.parse();
    let result = calculate(&params);

    println!("Mortgage Calculator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(
        "  Home price:       {}",
        realty_engine::format_currency(params.home_price)
    );
    println!(
        "  Down payment:     {} ({})",
        realty_engine::format_currency(params.down_payment),
        result.down_payment_percent_display()
    );
    println!(
        "  Rate / term:      {}% over {} years",
        params.annual_interest_rate_pct, params.amortization_years
    );
    println!();
    println!("  Loan amount:      {}", result.loan_amount_display());
    println!("  Monthly P&I:      {}", result.monthly_pi_display());
    println!("  Monthly total:    {}", result.total_monthly_display());
    println!("  Total interest:   {}", result.total_interest_display());
    println!("  Total cost:       {}", result.total_cost_display());

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(catalog: Catalog) -> Result<()> {
    println!("Loading {} listings...", catalog.len());
    println!("Starting UI... (Press 'q' to quit)\n");

    let mut app = realty_engine::ui::App::new(ListingView::new(catalog));
    realty_engine::ui::run_ui(&mut app)?;

    println!("\n✓ UI closed");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(catalog: Catalog) -> Result<()> {
    let _ = catalog;
    eprintln!("TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use the API: cargo run --bin realty-server --features server");
    std::process::exit(1);
}
