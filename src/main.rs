use author_listings::cli::Cli;
use author_listings::config::{Config, ConfigLoader, InitResult};
use author_listings::core::AuthorListing;
use author_listings::store::MemoryPostStore;
use author_listings::ui::TemplateRenderer;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse_args();

    if cli.init {
        match Config::init()? {
            InitResult::Created(path) => println!("Created config at {}", path.display()),
            InitResult::AlreadyExists(path) => {
                println!("Config already exists at {}", path.display())
            }
        }
        println!(
            "Templates are in {}",
            ConfigLoader::get_themes_path().display()
        );
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_path(path)?,
        None => ConfigLoader::load(),
    };

    if cli.print_config {
        config.print()?;
        return Ok(());
    }

    let request = cli.request(&config)?;
    config.check_theme_dir()?;

    let posts_path = cli.posts.as_ref().ok_or("--posts <FILE> is required")?;
    let store = MemoryPostStore::load_json(posts_path)?;
    let renderer = TemplateRenderer::with_theme_dir(cli.theme_dir(&config));

    let mut listing = AuthorListing::new(store.clone(), store, renderer);
    println!("{}", listing.list_authors(&request)?);

    Ok(())
}
