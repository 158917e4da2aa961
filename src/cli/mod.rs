//! CLI for the bookr event booking client.
//!
//! Provides subcommands for interacting with a running event booking backend:
//! - `login` / `register` / `logout` / `whoami` - session management
//! - `events` - browse and (as admin) manage events
//! - `tags` - browse and (as admin) manage tags
//! - `bookings` - book events and list your bookings
//! - `upload` - upload an event image (admin)

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use crate::api::validation::{validate_event, validate_login, validate_registration, FieldError};
use crate::filter::EventFilter;
use crate::models::{
    Booking, Credentials, Event, EventUpdate, NewEvent, Registration, Role, Tag, User,
};
use crate::session::{check_access, Access};
use crate::AppContext;

/// CLI arguments structure
#[derive(Parser, Debug)]
#[command(name = "bookr")]
#[command(author, version, about = "A fast, lightweight client for the event booking API", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "bookr.toml")]
    pub config: PathBuf,

    /// Override log level
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// API URL to connect to (overrides the config file)
    #[arg(long, env = "BOOKR_API_URL")]
    pub api_url: Option<String>,

    /// Bearer token to use instead of the stored credential
    #[arg(long, env = "BOOKR_TOKEN")]
    pub token: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and store the session credential
    Login {
        /// Account email
        email: String,
        /// Account password
        password: String,
    },

    /// Create an account and log in
    Register {
        /// Desired username
        username: String,
        /// Account email
        email: String,
        /// Account password
        password: String,
    },

    /// Log out and clear the stored credential
    Logout,

    /// Show the current session
    Whoami,

    /// Event commands
    #[command(subcommand)]
    Events(EventsCommands),

    /// Tag commands
    #[command(subcommand)]
    Tags(TagsCommands),

    /// Booking commands
    #[command(subcommand)]
    Bookings(BookingsCommands),

    /// Upload an event image (admin)
    Upload {
        /// Path to the image file (jpg, jpeg, png, gif; max 3MB)
        file: PathBuf,
    },
}

/// Events subcommands
#[derive(Subcommand, Debug)]
pub enum EventsCommands {
    /// List events, optionally filtered client-side
    List {
        /// Only events in this category (exact match)
        #[arg(long)]
        category: Option<String>,
        /// Only events carrying at least one of these tags (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Show details for one event
    Show {
        /// Event ID
        id: String,
    },
    /// Create an event (admin)
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        category: String,
        /// Event date, RFC 3339 (e.g. 2026-09-20T19:30:00Z)
        #[arg(long)]
        date: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        price: f64,
        /// Image URL or path previously returned by `bookr upload`
        #[arg(long)]
        image: String,
        /// Tag IDs to attach (repeatable)
        #[arg(long = "tag-id")]
        tag_ids: Vec<String>,
    },
    /// Update an event (admin); only the given fields change
    Update {
        /// Event ID
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Event date, RFC 3339
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        image: Option<String>,
        /// Replacement tag IDs (repeatable)
        #[arg(long = "tag-id")]
        tag_ids: Option<Vec<String>>,
    },
    /// Delete an event (admin)
    Delete {
        /// Event ID
        id: String,
    },
}

/// Tags subcommands
#[derive(Subcommand, Debug)]
pub enum TagsCommands {
    /// List all tags
    List,
    /// Show one tag
    Show {
        /// Tag ID
        id: String,
    },
    /// Create a tag (admin)
    Create {
        /// Tag name
        name: String,
    },
    /// Rename a tag (admin)
    Update {
        /// Tag ID
        id: String,
        /// New name
        name: String,
    },
    /// Delete a tag (admin)
    Delete {
        /// Tag ID
        id: String,
    },
}

/// Bookings subcommands
#[derive(Subcommand, Debug)]
pub enum BookingsCommands {
    /// Book an event
    Create {
        /// Event ID
        event_id: String,
    },
    /// List your bookings
    List,
}

/// Run a CLI command
pub async fn run_command(ctx: &AppContext, cli: &Cli) -> Result<()> {
    resume_session(ctx);

    match &cli.command {
        Commands::Login { email, password } => cmd_login(ctx, email, password).await,
        Commands::Register {
            username,
            email,
            password,
        } => cmd_register(ctx, username, email, password).await,
        Commands::Logout => cmd_logout(ctx),
        Commands::Whoami => cmd_whoami(ctx),
        Commands::Events(cmd) => match cmd {
            EventsCommands::List { category, tags } => {
                cmd_events_list(ctx, category.as_deref(), tags).await
            }
            EventsCommands::Show { id } => cmd_events_show(ctx, id).await,
            EventsCommands::Create {
                name,
                description,
                category,
                date,
                location,
                price,
                image,
                tag_ids,
            } => {
                let event = NewEvent {
                    name: name.clone(),
                    description: description.clone(),
                    category: category.clone(),
                    date: parse_date(date)?,
                    location: location.clone(),
                    price: *price,
                    image: image.clone(),
                    tag_ids: tag_ids.clone(),
                };
                cmd_events_create(ctx, event).await
            }
            EventsCommands::Update {
                id,
                name,
                description,
                category,
                date,
                location,
                price,
                image,
                tag_ids,
            } => {
                let update = EventUpdate {
                    name: name.clone(),
                    description: description.clone(),
                    category: category.clone(),
                    date: date.as_deref().map(parse_date).transpose()?,
                    location: location.clone(),
                    price: *price,
                    image: image.clone(),
                    tag_ids: tag_ids.clone(),
                };
                cmd_events_update(ctx, id, update).await
            }
            EventsCommands::Delete { id } => cmd_events_delete(ctx, id).await,
        },
        Commands::Tags(cmd) => match cmd {
            TagsCommands::List => cmd_tags_list(ctx).await,
            TagsCommands::Show { id } => cmd_tags_show(ctx, id).await,
            TagsCommands::Create { name } => cmd_tags_create(ctx, name).await,
            TagsCommands::Update { id, name } => cmd_tags_update(ctx, id, name).await,
            TagsCommands::Delete { id } => cmd_tags_delete(ctx, id).await,
        },
        Commands::Bookings(cmd) => match cmd {
            BookingsCommands::Create { event_id } => cmd_bookings_create(ctx, event_id).await,
            BookingsCommands::List => cmd_bookings_list(ctx).await,
        },
        Commands::Upload { file } => cmd_upload(ctx, file).await,
    }
}

// ============================================================================
// Session commands
// ============================================================================

async fn cmd_login(ctx: &AppContext, email: &str, password: &str) -> Result<()> {
    if let Err(errors) = validate_login(email, password) {
        print_field_errors(&errors);
        bail!("Validation failed");
    }

    ctx.session.lock().login_started();

    let result = ctx
        .api
        .login(&Credentials {
            email: email.to_string(),
            password: password.to_string(),
        })
        .await;

    match result {
        Ok(auth) => {
            save_profile(ctx, &auth.user)?;
            let username = auth.user.username.clone();
            let role = auth.user.role;
            ctx.session.lock().login_succeeded(auth.user, auth.token);

            println!("Logged in as {} ({})", username, role.as_str());
            Ok(())
        }
        Err(e) => {
            let message = e.to_string();
            ctx.session.lock().login_failed(message.clone());
            bail!("Login failed: {}", message);
        }
    }
}

async fn cmd_register(
    ctx: &AppContext,
    username: &str,
    email: &str,
    password: &str,
) -> Result<()> {
    if let Err(errors) = validate_registration(username, email, password) {
        print_field_errors(&errors);
        bail!("Validation failed");
    }

    ctx.session.lock().login_started();

    let result = ctx
        .api
        .register(&Registration {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })
        .await;

    match result {
        Ok(auth) => {
            save_profile(ctx, &auth.user)?;
            let username = auth.user.username.clone();
            ctx.session.lock().login_succeeded(auth.user, auth.token);

            println!("Account created. Logged in as {}", username);
            Ok(())
        }
        Err(e) => {
            let message = e.to_string();
            ctx.session.lock().login_failed(message.clone());
            bail!("Registration failed: {}", message);
        }
    }
}

fn cmd_logout(ctx: &AppContext) -> Result<()> {
    // Token store and session state are cleared together.
    ctx.api.logout();
    clear_profile(ctx);
    ctx.session.lock().logged_out();

    println!("Logged out.");
    Ok(())
}

fn cmd_whoami(ctx: &AppContext) -> Result<()> {
    let session = ctx.session.lock();
    match session.user() {
        Some(user) => {
            println!("Logged in as {} <{}>", user.username, user.email);
            println!("Role: {}", user.role.as_str());
            let admin = matches!(
                check_access(&session, Some(Role::Admin)),
                Access::Granted
            );
            println!("Admin access: {}", if admin { "yes" } else { "no" });
        }
        None => {
            if ctx.api.stored_token().is_some() {
                println!("A credential is stored but the identity is unknown.");
                println!("Run 'bookr login' to refresh it.");
            } else {
                println!("Not logged in.");
            }
        }
    }
    Ok(())
}

// ============================================================================
// Event commands
// ============================================================================

async fn cmd_events_list(
    ctx: &AppContext,
    category: Option<&str>,
    tags: &[String],
) -> Result<()> {
    let events = ctx
        .api
        .list_events()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let mut filter = EventFilter::new();
    if let Some(category) = category {
        filter = filter.with_category(category);
    }
    for tag in tags {
        filter = filter.with_tag(tag.clone());
    }
    let events = if filter.is_empty() {
        events
    } else {
        filter.apply(&events)
    };

    if events.is_empty() {
        println!("No events found.");
        return Ok(());
    }

    println!();
    println!(
        "{:<36}  {:<24}  {:<12}  {:<16}  {:<8}  {}",
        "ID", "NAME", "CATEGORY", "DATE", "PRICE", "TAGS"
    );
    println!("{}", "-".repeat(110));
    for event in &events {
        println!(
            "{:<36}  {:<24}  {:<12}  {:<16}  {:<8}  {}",
            event.id,
            truncate(&event.name, 24),
            truncate(&event.category, 12),
            event.date.format("%Y-%m-%d %H:%M"),
            format!("{:.2}", event.price),
            tag_names(&event.tags),
        );
    }
    println!();
    Ok(())
}

async fn cmd_events_show(ctx: &AppContext, id: &str) -> Result<()> {
    let event = ctx
        .api
        .get_event(id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    print_event(&event);
    Ok(())
}

async fn cmd_events_create(ctx: &AppContext, event: NewEvent) -> Result<()> {
    require_access(ctx, Some(Role::Admin))?;

    if let Err(errors) = validate_event(&event) {
        print_field_errors(&errors);
        bail!("Validation failed");
    }

    let created = ctx
        .api
        .create_event(&event)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("Event created.");
    print_event(&created);
    Ok(())
}

async fn cmd_events_update(ctx: &AppContext, id: &str, update: EventUpdate) -> Result<()> {
    require_access(ctx, Some(Role::Admin))?;

    if update.is_empty() {
        bail!("Nothing to update; pass at least one field flag.");
    }

    let updated = ctx
        .api
        .update_event(id, &update)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("Event updated.");
    print_event(&updated);
    Ok(())
}

async fn cmd_events_delete(ctx: &AppContext, id: &str) -> Result<()> {
    require_access(ctx, Some(Role::Admin))?;

    ctx.api
        .delete_event(id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("Event {} deleted.", id);
    Ok(())
}

// ============================================================================
// Tag commands
// ============================================================================

async fn cmd_tags_list(ctx: &AppContext) -> Result<()> {
    let tags = ctx
        .api
        .list_tags()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    if tags.is_empty() {
        println!("No tags found.");
        return Ok(());
    }

    println!();
    println!("{:<36}  {}", "ID", "NAME");
    println!("{}", "-".repeat(60));
    for tag in &tags {
        println!("{:<36}  {}", tag.id, tag.name);
    }
    println!();
    Ok(())
}

async fn cmd_tags_show(ctx: &AppContext, id: &str) -> Result<()> {
    let tag = ctx
        .api
        .get_tag(id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    println!("ID:   {}", tag.id);
    println!("Name: {}", tag.name);
    Ok(())
}

async fn cmd_tags_create(ctx: &AppContext, name: &str) -> Result<()> {
    require_access(ctx, Some(Role::Admin))?;

    if name.is_empty() {
        bail!("Tag name is required");
    }

    let tag = ctx
        .api
        .create_tag(name)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("Tag created: {} ({})", tag.name, tag.id);
    Ok(())
}

async fn cmd_tags_update(ctx: &AppContext, id: &str, name: &str) -> Result<()> {
    require_access(ctx, Some(Role::Admin))?;

    let tag = ctx
        .api
        .update_tag(id, name)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("Tag renamed to {}", tag.name);
    Ok(())
}

async fn cmd_tags_delete(ctx: &AppContext, id: &str) -> Result<()> {
    require_access(ctx, Some(Role::Admin))?;

    ctx.api
        .delete_tag(id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("Tag {} deleted.", id);
    Ok(())
}

// ============================================================================
// Booking & upload commands
// ============================================================================

async fn cmd_bookings_create(ctx: &AppContext, event_id: &str) -> Result<()> {
    require_access(ctx, None)?;

    let booking = ctx
        .api
        .create_booking(event_id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("Booked '{}' ({})", booking.event.name, booking.id);
    println!("Date: {}", booking.event.date.format("%Y-%m-%d %H:%M"));
    Ok(())
}

async fn cmd_bookings_list(ctx: &AppContext) -> Result<()> {
    require_access(ctx, None)?;

    let bookings = ctx
        .api
        .list_my_bookings()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    if bookings.is_empty() {
        println!("No bookings yet.");
        return Ok(());
    }

    println!();
    println!(
        "{:<36}  {:<24}  {:<16}  {}",
        "ID", "EVENT", "DATE", "BOOKED AT"
    );
    println!("{}", "-".repeat(100));
    for booking in &bookings {
        print_booking_row(booking);
    }
    println!();
    Ok(())
}

async fn cmd_upload(ctx: &AppContext, file: &PathBuf) -> Result<()> {
    require_access(ctx, Some(Role::Admin))?;

    let url = ctx
        .api
        .upload_image(file)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("Uploaded: {}", url);
    println!("Use this URL as --image when creating an event.");
    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Rebuild the session from the stored credential and the identity cached at
/// last login. Without both, the session stays anonymous.
fn resume_session(ctx: &AppContext) {
    if let (Some(user), Some(token)) = (load_profile(ctx), ctx.api.stored_token()) {
        ctx.session.lock().resumed(user, token);
    }
}

/// Local access check before admin/authenticated commands. An explicit
/// `--token` override bypasses it; the server still enforces roles.
fn require_access(ctx: &AppContext, role: Option<Role>) -> Result<()> {
    if ctx.token_override {
        return Ok(());
    }
    match check_access(&ctx.session.lock(), role) {
        Access::Granted => Ok(()),
        Access::RedirectToLogin => bail!("Not logged in. Run 'bookr login' first."),
        Access::RedirectToHome => bail!("This command requires an admin account."),
    }
}

fn profile_path(ctx: &AppContext) -> PathBuf {
    ctx.config.auth.data_dir.join("profile.json")
}

fn save_profile(ctx: &AppContext, user: &User) -> Result<()> {
    let path = profile_path(ctx);
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
    }
    let json = serde_json::to_vec_pretty(user).context("Failed to serialize profile")?;
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))
}

fn load_profile(ctx: &AppContext) -> Option<User> {
    let bytes = fs::read(profile_path(ctx)).ok()?;
    serde_json::from_slice(&bytes).ok()
}

fn clear_profile(ctx: &AppContext) {
    let path = profile_path(ctx);
    if let Err(e) = fs::remove_file(&path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(error = %e, "Failed to remove profile file");
        }
    }
}

fn print_field_errors(errors: &[FieldError]) {
    for error in errors {
        eprintln!("  [!] {}", error);
    }
}

fn print_event(event: &Event) {
    println!();
    println!("=== {} ===", event.name);
    println!();
    println!("ID:          {}", event.id);
    println!("Category:    {}", event.category);
    println!("Date:        {}", event.date.format("%Y-%m-%d %H:%M"));
    println!("Location:    {}", event.location);
    println!("Price:       {:.2}", event.price);
    if !event.tags.is_empty() {
        println!("Tags:        {}", tag_names(&event.tags));
    }
    if !event.image.is_empty() {
        println!("Image:       {}", event.image);
    }
    println!();
    println!("{}", event.description);
    println!();
}

fn print_booking_row(booking: &Booking) {
    println!(
        "{:<36}  {:<24}  {:<16}  {}",
        booking.id,
        truncate(&booking.event.name, 24),
        booking.event.date.format("%Y-%m-%d %H:%M"),
        booking.created_at.format("%Y-%m-%d %H:%M"),
    );
}

fn tag_names(tags: &[Tag]) -> String {
    tags.iter()
        .map(|t| t.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse an RFC 3339 timestamp into UTC
fn parse_date(input: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(input)
        .map(|d| d.with_timezone(&Utc))
        .with_context(|| format!("Invalid date '{}'; expected RFC 3339 like 2026-09-20T19:30:00Z", input))
}

/// Truncate a string to max length with ellipsis
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
