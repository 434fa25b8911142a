use clap::{Parser, Subcommand};
use sixpack_core::*;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "sixpack")]
#[command(about = "Six Pack 30: a 30-day core workout challenge", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true, env = "SIXPACK_CONFIG")]
    config: Option<PathBuf>,

    /// Show debug logging
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show your progress dashboard (default)
    Status,

    /// List all 30 days
    Program,

    /// Show one day's workout
    Day {
        /// Day number (1-30)
        day: u32,
    },

    /// Run a day's workout step by step
    Workout {
        /// Day number (1-30)
        day: u32,

        /// Auto-complete (for testing) - mark every exercise done and save
        #[arg(long)]
        auto_complete: bool,
    },

    /// Mark a day complete without running it
    Complete {
        /// Day number (1-30)
        day: u32,
    },

    /// Clear all completed days
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Sign in, creating a local identity on first use
    Login,

    /// Sign out
    Logout,

    /// Show or set your display name
    Profile {
        /// New display name
        #[arg(long)]
        name: Option<String>,
    },

    /// Export progress to CSV
    Export {
        /// Output file
        path: PathBuf,
    },
}

/// Everything a command needs from the data directory
struct Context {
    config: Config,
    store: LocalStore,
    session: Session,
    session_path: PathBuf,
}

impl Context {
    fn open(data_dir: &Path, config: Config) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;
        let session_path = Session::path_in(data_dir);
        Ok(Self {
            config,
            store: LocalStore::in_dir(data_dir),
            session: Session::load(&session_path)?,
            session_path,
        })
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        sixpack_core::logging::init_with_level("debug");
    } else {
        sixpack_core::logging::init();
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli
        .data_dir
        .unwrap_or_else(|| config.data.data_dir.clone());
    let mut ctx = Context::open(&data_dir, config)?;

    match cli.command.unwrap_or(Commands::Status) {
        Commands::Status => cmd_status(&ctx),
        Commands::Program => cmd_program(&ctx),
        Commands::Day { day } => cmd_day(&ctx, day),
        Commands::Workout { day, auto_complete } => cmd_workout(&mut ctx, day, auto_complete),
        Commands::Complete { day } => cmd_complete(&mut ctx, day),
        Commands::Reset { yes } => cmd_reset(&mut ctx, yes),
        Commands::Login => cmd_login(&mut ctx),
        Commands::Logout => cmd_logout(&mut ctx),
        Commands::Profile { name } => cmd_profile(&mut ctx, name),
        Commands::Export { path } => cmd_export(&ctx, &path),
    }
}

fn cmd_status(ctx: &Context) -> Result<()> {
    let Some(user) = ctx.session.user_id else {
        println!("\n  Six Pack 30");
        println!("  Track your progress, complete daily workouts, and achieve your fitness goals.");
        println!();
        println!("  Sign in with `sixpack login` to start tracking.");
        println!("  Browse the days with `sixpack program`.");
        return Ok(());
    };

    let completed = ctx.store.completed_days(&user)?;
    let summary = ProgressSummary::from_completed(&completed);
    let name = ctx
        .store
        .profile(&user)?
        .map(|p| p.name)
        .unwrap_or_else(|| "Champion".into());

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  Welcome back, {}!", name);
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!(
        "  Progress:  {}% {}",
        summary.completion_percentage,
        progress_bar(summary.completion_percentage)
    );
    println!("  Completed: {} / {}", summary.completed_count, PROGRAM_DAYS);
    if summary.streak > 0 {
        println!("  Streak:    {} day(s). Keep it going!", summary.streak);
    } else {
        println!("  Streak:    0. Start your streak today");
    }
    println!();

    match summary.next_incomplete_day {
        Some(day) => {
            println!("  {} days to go. Day {} awaits you.", summary.remaining_count, day);
            println!("  Start it with `sixpack workout {}`", day);
        }
        None => {
            println!("  🎉 Congratulations! You completed the challenge!");
        }
    }
    println!();
    Ok(())
}

fn cmd_program(ctx: &Context) -> Result<()> {
    let completed = match ctx.session.user_id {
        Some(user) => Some(ctx.store.completed_days(&user)?),
        None => None,
    };

    println!("\n  Your complete workout schedule.");
    if completed.is_none() {
        println!("  Sign in to track your progress.");
    }

    for (week, days) in display_weeks() {
        let first = days.first().copied().unwrap_or_default();
        let last = days.last().copied().unwrap_or_default();
        println!();
        println!("  Week {} (Days {} - {})", week, first, last);

        for day in days {
            let Some(workout) = day_workout(day) else {
                continue;
            };
            let mark = match &completed {
                Some(done) if done.contains(&day) => "✓ ",
                Some(_) => "○ ",
                None => "",
            };
            let kind = if workout.is_recovery() {
                "Active recovery day"
            } else {
                "Core workout"
            };
            println!("    {}Day {:>2}  {:<22} {}", mark, day, workout.title, kind);
        }
    }
    println!();
    Ok(())
}

fn cmd_day(ctx: &Context, day: u32) -> Result<()> {
    let workout = day_workout(day).ok_or(Error::InvalidDay(day))?;
    let completed = match ctx.session.user_id {
        Some(user) => ctx.store.day_progress(&user, day)?.completed,
        None => false,
    };

    println!("\n  Day {}{}", workout.day_number, if completed { "  ✓ Completed" } else { "" });
    println!("  {}", workout.title);
    println!("  {}", workout.description);
    println!(
        "  {} min · {} exercises",
        workout.estimated_minutes,
        workout.exercises.len()
    );
    println!();
    println!("  Workout plan (follow these exercises in order):");

    for (index, exercise) in workout.exercises.iter().enumerate() {
        println!("  {:>2}. {:<18} {}", index + 1, exercise.name, exercise.summary());
        println!("      {}", exercise.description);
        if let Some(ref video) = exercise.media.video_ref {
            println!("      ℹ Demo: {}", video);
        }
    }

    println!();
    let verb = if completed { "Do it again" } else { "Start it" };
    println!("  {} with `sixpack workout {}`", verb, day);
    Ok(())
}

fn cmd_workout(ctx: &mut Context, day: u32, auto_complete: bool) -> Result<()> {
    let mut runner =
        WorkoutRunner::for_day(day)?.with_auto_advance(ctx.config.runner.auto_advance);

    if auto_complete {
        let user = ctx.session.require_user()?;
        for index in 0..runner.exercise_count() {
            runner.select(index);
            if !runner.is_completed(index) {
                runner.toggle_current();
            }
        }
        runner.complete_day(&mut ctx.store, &user)?;
        println!("\n✓ Day {} complete!", day);
        return Ok(());
    }

    let tick = Duration::from_millis(ctx.config.runner.tick_millis);

    loop {
        display_runner(&runner);

        match prompt_runner_action(&runner)? {
            RunnerAction::Toggle => {
                runner.toggle_current();
            }
            RunnerAction::Previous => runner.previous(),
            RunnerAction::Next => runner.next(),
            RunnerAction::StartTimer => run_countdown(&mut runner, tick)?,
            RunnerAction::ResetTimer => runner.timer_mut().reset(),
            RunnerAction::CompleteDay => {
                let Some(user) = ctx.session.user_id else {
                    println!("\n  Sign in with `sixpack login` to save your progress.");
                    continue;
                };
                match runner.complete_day(&mut ctx.store, &user) {
                    Ok(()) => {
                        println!(
                            "\n🏆 Amazing work on Day {}. You're one step closer to your goal!",
                            day
                        );
                        return Ok(());
                    }
                    Err(Error::WorkoutIncomplete { completed, total }) => {
                        println!(
                            "\n  Finish every exercise first ({} of {} done).",
                            completed, total
                        );
                    }
                    Err(e) => {
                        tracing::error!("Error marking day {} complete: {}", day, e);
                        println!("\n  Failed to save progress. Please try again.");
                    }
                }
            }
            RunnerAction::Quit => {
                println!("\n  Workout exited. Nothing was saved.");
                return Ok(());
            }
        }
    }
}

fn cmd_complete(ctx: &mut Context, day: u32) -> Result<()> {
    let user = ctx.session.require_user()?;
    ctx.store.mark_day_complete(&user, day)?;
    println!("✓ Day {} marked complete", day);
    Ok(())
}

fn cmd_reset(ctx: &mut Context, yes: bool) -> Result<()> {
    let user = ctx.session.require_user()?;

    if !yes {
        print!("Reset all progress? Type 'yes' to confirm: ");
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if input.trim() != "yes" {
            println!("Reset cancelled.");
            return Ok(());
        }
    }

    ctx.store.reset_progress(&user)?;
    println!("✓ Progress reset");
    Ok(())
}

fn cmd_login(ctx: &mut Context) -> Result<()> {
    let (user, role) = ctx.session.sign_in(&mut ctx.store)?;
    ctx.session.save(&ctx.session_path)?;

    println!("✓ Signed in as {} ({:?})", user, role);
    if ctx.store.profile(&user)?.is_none() {
        println!("  Set your name with `sixpack profile --name <NAME>`");
    }
    Ok(())
}

fn cmd_logout(ctx: &mut Context) -> Result<()> {
    ctx.session.sign_out();
    ctx.session.save(&ctx.session_path)?;
    println!("✓ Signed out");
    Ok(())
}

fn cmd_profile(ctx: &mut Context, name: Option<String>) -> Result<()> {
    let user = ctx.session.require_user()?;

    match name {
        Some(name) => {
            ctx.store.save_profile(&user, UserProfile { name })?;
            println!("✓ Profile saved");
        }
        None => {
            let role = ctx.store.role(Some(&user))?;
            match ctx.store.profile(&user)? {
                Some(profile) => println!("  Name: {}", profile.name),
                None => println!("  No name set"),
            }
            println!("  Role: {:?}", role);
            println!("  Id:   {}", user);
        }
    }
    Ok(())
}

fn cmd_export(ctx: &Context, path: &Path) -> Result<()> {
    let user = ctx.session.require_user()?;
    let count = export_progress(&ctx.store, &user, path)?;
    println!("✓ Exported {} days to {}", count, path.display());
    Ok(())
}

fn progress_bar(percentage: u32) -> String {
    let filled = (percentage / 5) as usize;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(20 - filled))
}

fn display_runner(runner: &WorkoutRunner) {
    let workout = runner.workout();
    let exercise = runner.current_exercise();

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  Day {}: {}", workout.day_number, workout.title);
    println!("╰─────────────────────────────────────────╯");
    println!(
        "  {} of {} exercises completed ({:.0}%)",
        runner.completed_count(),
        runner.exercise_count(),
        runner.progress_percentage()
    );
    println!();

    for (index, item) in workout.exercises.iter().enumerate() {
        let pointer = if index == runner.current_index() { "→" } else { " " };
        let check = if runner.is_completed(index) { "✓" } else { "○" };
        println!("  {} {} {:<18} {}", pointer, check, item.name, item.summary());
    }

    println!();
    println!(
        "  [{} / {}] {}",
        runner.current_index() + 1,
        runner.exercise_count(),
        exercise.name
    );
    println!("  {}", exercise.description);
    match exercise.kind {
        ExerciseKind::Reps { sets, reps } => println!("  {} sets · {} reps", sets, reps),
        ExerciseKind::Timed { .. } | ExerciseKind::Rest { .. } => {
            println!("  Timer: {}", runner.timer().format())
        }
    }
}

enum RunnerAction {
    Toggle,
    Previous,
    Next,
    StartTimer,
    ResetTimer,
    CompleteDay,
    Quit,
}

fn prompt_runner_action(runner: &WorkoutRunner) -> Result<RunnerAction> {
    let toggle_label = if runner.is_completed(runner.current_index()) {
        "mark incomplete"
    } else {
        "complete exercise"
    };

    println!("─────────────────────────────────────────");
    println!("Press Enter to {}", toggle_label);
    if runner.current_exercise().kind.duration_seconds().is_some() {
        println!("  't' + Enter to start the timer, 'r' to reset it");
    }
    if !runner.is_first() {
        println!("  'p' + Enter for the previous exercise");
    }
    if !runner.is_last() {
        println!("  'n' + Enter for the next exercise");
    }
    if runner.all_complete() {
        println!("  'c' + Enter to complete Day {}", runner.workout().day_number);
    }
    println!("  'q' + Enter to exit");
    print!("> ");
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        // stdin closed
        return Ok(RunnerAction::Quit);
    }

    let action = match input.trim().to_lowercase().as_str() {
        "p" => RunnerAction::Previous,
        "n" => RunnerAction::Next,
        "t" => RunnerAction::StartTimer,
        "r" => RunnerAction::ResetTimer,
        "c" => RunnerAction::CompleteDay,
        "q" => RunnerAction::Quit,
        _ => RunnerAction::Toggle,
    };

    Ok(action)
}

/// Count the current exercise down to zero, one tick per interval
fn run_countdown(runner: &mut WorkoutRunner, tick: Duration) -> Result<()> {
    let timer = runner.timer_mut();
    timer.start();

    while timer.is_running() {
        print!("\r  ⏱  {} ", timer.format());
        io::stdout().flush()?;
        std::thread::sleep(tick);
        timer.tick();
    }

    println!("\r  ⏱  {}  Time!", timer.format());
    Ok(())
}
