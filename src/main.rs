use anyhow::{bail, Context, Result};
use std::env;

// Use library instead of local modules
use realty_insight::{
    annual_changes, export_record, AppConfig, MarketEngine, MarketSentiment, PropertyType,
    RealEstateRecord,
};

const USAGE: &str = "\
Usage:
  realty-insight analyze <query> [--type T] [--json]
  realty-insight guide <query> [--type T]
  realty-insight locations
  realty-insight export <query> <history.csv> <forecast.csv> [--type T]

Property types: apartment, flat, villa, plot, commercial";

/// Positional arguments plus the flags every command understands
struct CliArgs {
    positional: Vec<String>,
    property_type: Option<PropertyType>,
    json: bool,
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut positional = Vec::new();
    let mut property_type = None;
    let mut json = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--type" | "-t" => {
                let value = iter.next().context("--type needs a value")?;
                property_type = Some(value.parse::<PropertyType>()?);
            }
            "--json" => json = true,
            _ => positional.push(arg.clone()),
        }
    }

    Ok(CliArgs {
        positional,
        property_type,
        json,
    })
}

fn main() -> Result<()> {
    // Logs go to stderr so --json output stays clean
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let args: Vec<String> = env::args().collect();
    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let engine = MarketEngine::from_config(&config);

    let Some(command) = args.get(1) else {
        println!("{}", USAGE);
        return Ok(());
    };
    let cli = parse_args(&args[2..])?;
    let property_type = cli.property_type.unwrap_or(config.default_property_type);

    match command.as_str() {
        "analyze" => {
            let query = query_arg(&cli)?;
            let record = engine.generate(query, property_type);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(record.as_ref())?);
            } else {
                print_analysis(&record);
            }
        }
        "guide" => {
            let query = query_arg(&cli)?;
            let record = engine.generate(query, property_type);
            print_guidance(&engine, &record);
        }
        "locations" => print_locations(&engine),
        "export" => {
            let [query, history_path, forecast_path] = cli.positional.as_slice() else {
                bail!("export needs <query> <history.csv> <forecast.csv>\n\n{}", USAGE);
            };
            let record = engine.generate(query, property_type);
            export_record(&record, history_path, forecast_path)?;
            println!("✓ Wrote {} history rows to {}", record.history.len(), history_path);
            println!("✓ Wrote {} forecast rows to {}", record.forecast.len(), forecast_path);
        }
        "help" | "--help" | "-h" => println!("{}", USAGE),
        other => bail!("Unknown command: {}\n\n{}", other, USAGE),
    }

    Ok(())
}

fn query_arg(cli: &CliArgs) -> Result<&str> {
    match cli.positional.as_slice() {
        [query] => Ok(query.as_str()),
        [] => bail!("Missing <query>\n\n{}", USAGE),
        _ => bail!("Expected a single <query>; quote multi-word locations"),
    }
}

fn print_analysis(record: &RealEstateRecord) {
    println!("🏙️  {}", record.location);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    if let Some(nearby) = &record.nearby_location_name {
        println!("⚠️  No data for '{}', showing nearby {}", record.query, nearby);
    }

    println!("\n📊 {} in {}", record.property_type.display_name(), record.label);
    println!("   Price:          ₹{:.0}/sq.ft", record.current_price);
    println!("   YoY growth:     {:+.1}%", record.yoy_growth);
    println!("   5Y CAGR:        {:.1}%", record.cagr_5y);
    println!("   Transactions:   {}", record.transactions);
    println!("   5Y outlook:     {:+.1}%", record.projected_growth_5y);
    println!("   10Y outlook:    {:+.1}%", record.projected_growth_10y);
    println!("   Sentiment:      {:?}", MarketSentiment::from_yoy(record.yoy_growth));

    println!("\n📅 History");
    for row in annual_changes(&record.history) {
        match row.change_pct {
            Some(change) => println!("   {}  ₹{:>8.0}  {:+.1}%", row.year, row.price, change),
            None => println!("   {}  ₹{:>8.0}", row.year, row.price),
        }
    }

    println!("\n🔮 Forecast (conservative / moderate / aggressive)");
    for point in &record.forecast {
        println!(
            "   {}  ₹{:>8.0} / ₹{:>8.0} / ₹{:>8.0}   band ₹{:.0}-₹{:.0}",
            point.year,
            point.conservative,
            point.price,
            point.aggressive,
            point.lower_bound,
            point.upper_bound
        );
    }
}

fn print_guidance(engine: &MarketEngine, record: &RealEstateRecord) {
    let buyer = engine.buyer_insight(record);
    let seller = engine.seller_insight(record);

    println!("{}", record.summary());

    println!("\n🛒 Buyer");
    println!("   Action:         {:?}", buyer.action);
    println!("   Risk:           {:?}", buyer.risk_level);
    println!("   Rental yield:   {:.1}%", buyer.rental_yield);
    println!("   Undervalued:    {}", if buyer.undervalued { "yes" } else { "no" });
    for sector in &buyer.top_sectors {
        println!("   ↗ {} ({:+.0}% over 10Y)", sector.label, sector.projected_growth_10y);
    }
    println!("   {}", buyer.reasoning);

    println!("\n🏷️  Seller");
    println!("   Action:         {}", seller.suggested_action);
    println!("   Market heat:    {:?}", seller.market_heat);
    println!("   Demand:         {:?}", seller.demand_trend);
    println!("   Next year:      ₹{:.0}/sq.ft", seller.estimated_price_next_year);
    println!("   Best time:      {}", seller.best_time_to_sell);
    println!("   {}", seller.reasoning);
}

fn print_locations(engine: &MarketEngine) {
    let catalog = engine.catalog();
    println!("📍 {} locations in {} cities", catalog.len(), catalog.cities().len());

    for city in catalog.cities() {
        let areas: Vec<&str> = catalog
            .areas_in(city)
            .into_iter()
            .map(|entry| entry.area.as_str())
            .collect();
        println!("\n{} ({})", city, areas.len());
        println!("   {}", areas.join(", "));
    }

    println!("\n⭐ Popular: {}", catalog.popular_locations().join(" · "));
}
