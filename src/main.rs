use ispquote::cli::Cli;
use ispquote::config::{Config, ConfigLoader};
use ispquote::core::{catalog_json, render_catalog, render_estimate, Estimate, EstimateRequest};
use ispquote::utils::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse_args();
    logging::init(cli.verbose);

    // Handle configuration commands
    if cli.init {
        Config::init(cli.config_file.as_deref())?;
        return Ok(());
    }

    let config = ConfigLoader::load(cli.config_file.as_deref())?;

    if cli.print {
        config.print()?;
        return Ok(());
    }

    if cli.check {
        config.check()?;
        println!("✓ Pricing book valid");
        return Ok(());
    }

    let book = config.validate()?;
    let period = cli.period();

    if cli.list || !cli.wants_estimate() {
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&catalog_json(&book))?);
        } else {
            print!("{}", render_catalog(&book, period));
        }
        return Ok(());
    }

    let selection = cli.selection(&book.catalog)?;
    let request = EstimateRequest {
        period,
        emails: cli.emails,
        email_step: cli.email_step,
        dedicated_ip: cli.dedicated_ip,
        bundle: cli.bundle.clone(),
        seats: cli.seats,
    };
    let estimate = Estimate::build(&book, &selection, &request)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&estimate)?);
    } else {
        print!("{}", render_estimate(&estimate, &book));
    }

    Ok(())
}
