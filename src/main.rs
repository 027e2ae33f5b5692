use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use property_dashboard::api;
use property_dashboard::client::{
    media_kind, Action, ApiClient, ClientError, Dashboard, FormErrors, MediaKind, Outcome,
    PropertyApi, PropertyForm,
};
use property_dashboard::config::Config;
use property_dashboard::models::{Property, PropertyType, UnknownPropertyType};
use property_dashboard::seed;
use property_dashboard::store;

#[derive(Parser)]
#[command(name = "property-dashboard", version, about = "Property listing dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the REST API service
    Serve,
    /// Replace the stored listings with the sample data set
    Seed,
    /// List properties through the API
    List {
        /// Case-insensitive match on name or location
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long = "type", value_parser = parse_property_type)]
        kind: Option<PropertyType>,
    },
    /// Show one property
    Show { id: String },
    /// Add a property
    Add(FormArgs),
    /// Edit an existing property; omitted fields keep their current values
    Edit {
        id: String,
        #[command(flatten)]
        fields: FormArgs,
    },
    /// Delete a property
    Delete { id: String },
}

#[derive(Args, Default)]
struct FormArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long = "type", value_parser = parse_property_type)]
    kind: Option<PropertyType>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    price: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    image: Option<String>,
    /// Embed a local JPG, PNG or MP4 file (max 10MB) as the image
    #[arg(long, conflicts_with = "image")]
    file: Option<PathBuf>,
    #[arg(long)]
    lat: Option<String>,
    #[arg(long)]
    lng: Option<String>,
}

impl FormArgs {
    fn apply_to(self, form: &mut PropertyForm) -> anyhow::Result<()> {
        if let Some(name) = self.name {
            form.name = name;
        }
        if self.kind.is_some() {
            form.kind = self.kind;
        }
        if let Some(location) = self.location {
            form.location = location;
        }
        if let Some(price) = self.price {
            form.price = price;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        if let Some(image) = self.image {
            form.image = image;
        }
        if let Some(lat) = self.lat {
            form.lat = lat;
        }
        if let Some(lng) = self.lng {
            form.lng = lng;
        }
        if let Some(path) = self.file {
            form.attach_file(&path)
                .with_context(|| format!("Cannot use {} as the image", path.display()))?;
        }
        Ok(())
    }
}

fn parse_property_type(value: &str) -> Result<PropertyType, String> {
    value.parse().map_err(|e: UnknownPropertyType| {
        let allowed: Vec<&str> = PropertyType::ALL.iter().map(|t| t.as_str()).collect();
        format!("{e}; expected one of: {}", allowed.join(", "))
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    config.logging.init();

    match cli.command {
        Command::Serve => {
            info!("🏠 Property Dashboard API");
            let store = store::connect(&config.database_url)
                .context("Failed to connect to the property store")?;
            api::serve(&config, store).await?;
        }
        Command::Seed => {
            let store = store::connect(&config.database_url)
                .context("Failed to connect to the property store")?;
            let properties = seed::seed(store.as_ref()).await?;
            print_listing(&properties.iter().collect::<Vec<_>>());
        }
        Command::List { search, kind } => {
            let mut dashboard = dashboard(&config)?;
            if dashboard.load().await == Outcome::Failed {
                bail!("Failed to load properties");
            }
            dashboard.dispatch(Action::SetSearch(search));
            dashboard.dispatch(Action::SetFilterType(kind));

            let state = dashboard.state();
            let visible = state.visible();
            if visible.is_empty() {
                println!("{}", state.empty_message());
            } else {
                print_listing(&visible);
                println!("{}", state.summary());
            }
        }
        Command::Show { id } => {
            let client = ApiClient::new(&config.api_url)?;
            let property = client.get_property(&id).await.map_err(|e| fetch_error(&id, e))?;
            print_details(&property);
        }
        Command::Add(fields) => {
            let mut dashboard = dashboard(&config)?;
            let mut form = PropertyForm::default();
            fields.apply_to(&mut form)?;

            finish(dashboard.submit_add(&form).await, &dashboard)?;
        }
        Command::Edit { id, fields } => {
            let mut dashboard = dashboard(&config)?;
            let property = dashboard
                .api()
                .get_property(&id)
                .await
                .map_err(|e| fetch_error(&id, e))?;

            let mut form = PropertyForm::from_property(&property);
            dashboard.dispatch(Action::OpenEditForm(property));
            fields.apply_to(&mut form)?;

            finish(dashboard.submit_update(&form).await, &dashboard)?;
        }
        Command::Delete { id } => {
            let mut dashboard = dashboard(&config)?;
            let property = dashboard
                .api()
                .get_property(&id)
                .await
                .map_err(|e| fetch_error(&id, e))?;

            dashboard.dispatch(Action::RequestDelete(property));
            let outcome = dashboard.confirm_delete().await;
            finish(Ok(outcome), &dashboard)?;
        }
    }

    Ok(())
}

fn fetch_error(id: &str, err: ClientError) -> anyhow::Error {
    if err.is_not_found() {
        anyhow::anyhow!("No property with id {id}")
    } else {
        anyhow::Error::new(err).context(format!("Failed to fetch property {id}"))
    }
}

fn dashboard(config: &Config) -> anyhow::Result<Dashboard<ApiClient>> {
    let client = ApiClient::new(&config.api_url).context("Failed to build API client")?;
    Ok(Dashboard::new(client))
}

/// Report a submitted flow's notification, or the form errors that stopped it
fn finish(
    result: Result<Outcome, FormErrors>,
    dashboard: &Dashboard<ApiClient>,
) -> anyhow::Result<()> {
    let outcome = match result {
        Ok(outcome) => outcome,
        Err(errors) => {
            for (field, message) in &errors {
                eprintln!("  {field}: {message}");
            }
            bail!("Form has {} invalid field(s)", errors.len());
        }
    };

    if let Some(notification) = &dashboard.state().notification {
        println!("{}", notification.message);
    }

    match outcome {
        Outcome::Succeeded => Ok(()),
        Outcome::Failed => bail!("Request failed"),
    }
}

fn print_listing(properties: &[&Property]) {
    for (i, property) in properties.iter().enumerate() {
        println!("{}. {} ({})", i + 1, property.name, property.formatted_price());
        println!("   {} in {}", property.kind, property.location);
        println!("   ID: {}", property.id);
        println!();
    }
}

fn print_details(property: &Property) {
    println!("{}", property.name);
    println!("   Type: {}", property.kind);
    println!("   Location: {}", property.location);
    println!("   Price: {}", property.formatted_price());
    println!(
        "   Coordinates: {}, {}",
        property.coordinates.lat, property.coordinates.lng
    );
    match media_kind(property) {
        MediaKind::None => {}
        MediaKind::Video if property.image.starts_with("data:") => {
            println!("   Media: embedded video");
        }
        MediaKind::Image if property.image.starts_with("data:") => {
            println!("   Media: embedded image");
        }
        MediaKind::Video => println!("   Video: {}", property.image),
        MediaKind::Image => println!("   Image: {}", property.image),
    }
    println!("   Added: {}", property.created_at.to_rfc3339());
    println!();
    println!("{}", property.description);
}
