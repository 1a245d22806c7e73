use clap::{Parser, Subcommand, ValueEnum};
use mapty_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mapty")]
#[command(about = "Map-pinned running and cycling log", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new workout at a map pin
    Add {
        #[command(flatten)]
        form: WorkoutForm,

        /// Pin latitude
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Pin longitude
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },

    /// Replace the contents of an existing workout
    Edit {
        /// Workout id
        id: String,

        #[command(flatten)]
        form: WorkoutForm,

        /// New pin latitude (defaults to the current one)
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,

        /// New pin longitude (defaults to the current one)
        #[arg(long, allow_hyphen_values = true)]
        lng: Option<f64>,
    },

    /// Delete one workout
    Delete {
        /// Workout id
        id: String,
    },

    /// Delete every workout
    Clear,

    /// Erase all saved data
    Reset,

    /// List workouts (default)
    List {
        /// Order the listing instead of showing insertion order
        #[arg(long, value_enum)]
        sort: Option<SortArg>,

        /// Smallest first when sorting
        #[arg(long, requires = "sort")]
        ascending: bool,
    },

    /// Show a single workout
    Show {
        /// Workout id
        id: String,
    },

    /// Center the map on a workout and count the click
    Focus {
        /// Workout id
        id: String,
    },
}

/// Form fields shared by add and edit, kept as raw text like the web form
#[derive(clap::Args)]
struct WorkoutForm {
    /// Workout type (running, cycling)
    #[arg(long = "type")]
    kind: String,

    /// Distance in km
    #[arg(long, allow_hyphen_values = true)]
    distance: String,

    /// Duration in minutes
    #[arg(long, allow_hyphen_values = true)]
    duration: String,

    /// Cadence (steps/min) for running, elevation gain (m) for cycling
    #[arg(long, allow_hyphen_values = true)]
    extra: String,
}

impl WorkoutForm {
    fn parse(&self, coords: Coords) -> Result<WorkoutInput> {
        WorkoutInput::parse(&self.kind, coords, &self.distance, &self.duration, &self.extra)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Date,
    Distance,
    Duration,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Date => SortKey::Date,
            SortArg::Distance => SortKey::Distance,
            SortArg::Duration => SortKey::Duration,
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    mapty_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    tracing::debug!("Using data directory {:?}", data_dir);
    let mut store = SessionStore::open(FileBackend::new(data_dir), &config);

    match cli.command {
        Some(Commands::Add { form, lat, lng }) => cmd_add(&mut store, &form, Coords::new(lat, lng)),
        Some(Commands::Edit { id, form, lat, lng }) => cmd_edit(&mut store, &id, &form, lat, lng),
        Some(Commands::Delete { id }) => cmd_delete(&mut store, &id),
        Some(Commands::Clear) => {
            let count = store.len();
            store.delete_all()?;
            println!("✓ Deleted {} workouts", count);
            Ok(())
        }
        Some(Commands::Reset) => {
            store.reset()?;
            println!("✓ Saved data erased");
            Ok(())
        }
        Some(Commands::List { sort, ascending }) => {
            cmd_list(&store, sort, ascending);
            Ok(())
        }
        Some(Commands::Show { id }) => cmd_show(&store, &id),
        Some(Commands::Focus { id }) => cmd_focus(&mut store, &id),
        None => {
            cmd_list(&store, None, false);
            Ok(())
        }
    }
}

fn cmd_add(store: &mut SessionStore<FileBackend>, form: &WorkoutForm, coords: Coords) -> Result<()> {
    let input = form.parse(coords)?;
    let workout = store.create(input)?;

    println!("✓ Added {}", workout.description());
    println!("  id: {}", workout.id());
    Ok(())
}

fn cmd_edit(
    store: &mut SessionStore<FileBackend>,
    id: &str,
    form: &WorkoutForm,
    lat: Option<f64>,
    lng: Option<f64>,
) -> Result<()> {
    let current = store
        .find_by_id(id)
        .map(|w| w.coords())
        .ok_or_else(|| Error::NotFound(id.to_string()))?;
    let coords = Coords::new(lat.unwrap_or(current.lat), lng.unwrap_or(current.lng));

    let input = form.parse(coords)?;
    let workout = store.edit(id, input)?;

    println!("✓ Updated {}", workout.id());
    display_workout(&workout);
    Ok(())
}

fn cmd_delete(store: &mut SessionStore<FileBackend>, id: &str) -> Result<()> {
    match store.delete(id)? {
        Some(workout) => println!("✓ Deleted {}", workout.description()),
        None => println!("No workout with id {} - nothing deleted.", id),
    }
    Ok(())
}

fn cmd_list(store: &SessionStore<FileBackend>, sort: Option<SortArg>, ascending: bool) {
    if store.is_empty() {
        println!("No workouts yet.");
        return;
    }

    let workouts: Vec<&Workout> = match sort {
        Some(key) => store.sorted(key.into(), ascending),
        None => store.workouts().iter().collect(),
    };

    for workout in workouts {
        let (headline, headline_unit) = workout.headline_metric();
        let (detail, detail_unit) = workout.detail_metric();
        println!(
            "{}  {} {:<24} {:>6} km {:>6} min {:>6.1} {:<6} {:>6} {}",
            workout.id(),
            workout.kind().icon(),
            workout.description(),
            workout.distance_km(),
            workout.duration_min(),
            headline,
            headline_unit,
            detail,
            detail_unit
        );
    }
}

fn cmd_show(store: &SessionStore<FileBackend>, id: &str) -> Result<()> {
    let workout = store
        .find_by_id(id)
        .ok_or_else(|| Error::NotFound(id.to_string()))?;
    display_workout(workout);
    Ok(())
}

fn cmd_focus(store: &mut SessionStore<FileBackend>, id: &str) -> Result<()> {
    let focus = store.focus(id)?;
    println!(
        "Map centered on {:.5}, {:.5} at zoom {}",
        focus.coords.lat, focus.coords.lng, focus.zoom
    );
    Ok(())
}

fn display_workout(workout: &Workout) {
    let (headline, headline_unit) = workout.headline_metric();
    let (detail, detail_unit) = workout.detail_metric();

    println!();
    println!("  {} {}", workout.kind().icon(), workout.description());
    println!("  id:       {}", workout.id());
    println!(
        "  pin:      {}, {}",
        workout.coords().lat,
        workout.coords().lng
    );
    println!("  distance: {} km", workout.distance_km());
    println!("  duration: {} min", workout.duration_min());
    println!("  ⚡️        {:.1} {}", headline, headline_unit);
    println!("  {:<9} {} {}", detail_label(workout.kind()), detail, detail_unit);
    println!("  clicks:   {}", workout.click_count());
    println!();
}

fn detail_label(kind: WorkoutKind) -> &'static str {
    match kind {
        WorkoutKind::Running => "cadence:",
        WorkoutKind::Cycling => "elev:",
    }
}
