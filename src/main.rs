//! Rakan Admin console
//!
//! Main application entry point

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use anyhow::Context;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};

use rakan_admin::{
    config::Settings,
    handlers::{
        self, CommentsScreen, ContactFormScreen, ContactTarget, ContactsScreen, DashboardView, LoginScreen,
        Mounted, ProductCatalog, Route, ScreenContext, TestimonialsView, UsersScreen, VideoDetail, VideoEditor,
        VideosScreen,
    },
    models::{ApprovalStatus, ContactReply, PublicContactRequest},
    services::{AssumeYes, Confirmer, Notifier, ServiceFactory, StdinConfirmer},
    state::{FileSessionStorage, MemorySessionStorage, SessionStorage, SessionStore},
    utils::{errors::AdminError, helpers, logging},
};

#[derive(Parser, Debug)]
#[command(name = "rakan-admin", version, about = "Admin console for the iGenius / Rakan content backend")]
struct Cli {
    /// Configuration file (defaults to ./config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Answer yes to confirmation prompts
    #[arg(short = 'y', long = "yes", global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in with a user id
    Login {
        user_id: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in profile
    #[command(alias = "dashboard")]
    Whoami,
    /// Show the navigation menu for the current session
    Menu,
    #[command(subcommand)]
    Videos(VideoCommand),
    #[command(subcommand)]
    Contacts(ContactCommand),
    #[command(subcommand)]
    Users(UserCommand),
    #[command(subcommand)]
    Comments(CommentCommand),
    /// Customer testimonials
    Testimonials,
    /// Product catalogue visible to the current session
    Products,
    /// Send the public contact form
    Contact(ContactArgs),
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug)]
enum VideoCommand {
    List {
        #[arg(long)]
        search: Option<String>,
        /// Include inactive videos
        #[arg(long)]
        all: bool,
    },
    Show { id: i64 },
    Add(VideoArgs),
    Edit {
        id: i64,
        #[command(flatten)]
        fields: VideoArgs,
        #[arg(long, conflicts_with = "inactive")]
        active: bool,
        #[arg(long)]
        inactive: bool,
    },
    Toggle { id: i64 },
    Delete { id: i64 },
}

#[derive(Args, Debug, Default)]
struct VideoArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    short_description: Option<String>,
    #[arg(long)]
    long_description: Option<String>,
    #[arg(long = "number")]
    video_number: Option<String>,
    #[arg(long)]
    photo: Option<PathBuf>,
    #[arg(long)]
    video: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum ContactCommand {
    List {
        #[arg(long)]
        search: Option<String>,
    },
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        message: Option<String>,
    },
    Delete { id: i64 },
    Reply {
        id: i64,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    List {
        #[arg(long)]
        search: Option<String>,
        /// approved, pending or expired
        #[arg(long)]
        status: Option<String>,
    },
    Stats,
    Edit {
        id: i64,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        account_type: Option<String>,
        #[arg(long)]
        admin: Option<bool>,
    },
    Delete { id: i64 },
    Approve { ids: Vec<i64> },
    Revoke { ids: Vec<i64> },
}

#[derive(Subcommand, Debug)]
enum CommentCommand {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        stars: Option<i64>,
    },
    Delete { id: i64 },
}

#[derive(Args, Debug)]
struct ContactArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    message: String,
    #[arg(long, default_value = "")]
    company: String,
    #[arg(long, default_value = "")]
    role: String,
    /// Store as a contact submission instead of the landing page form
    #[arg(long)]
    submission: bool,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default configuration
    Init {
        #[arg(long, default_value = "config.toml")]
        path: PathBuf,
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path),
        None => Settings::new(),
    }
    .context("failed to load configuration")?;
    settings.validate().context("invalid configuration")?;

    let _log_guard = logging::init_logging(&settings.logging)?;
    info!(version = rakan_admin::VERSION, base_url = %settings.api.base_url, "Starting {}", rakan_admin::info());

    let storage: Box<dyn SessionStorage> = if settings.session.persist {
        Box::new(FileSessionStorage::new(&settings.session.file_path))
    } else {
        Box::new(MemorySessionStorage::new())
    };
    let mut session = SessionStore::new(storage);
    session.init()?;

    let confirmer: Arc<dyn Confirmer> = if cli.yes { Arc::new(AssumeYes) } else { Arc::new(StdinConfirmer) };
    let ctx = ScreenContext::new(
        ServiceFactory::new(&settings)?,
        Notifier::console(),
        confirmer,
        settings.features.clone(),
    );

    let ok = match cli.command {
        Command::Config(ConfigCommand::Init { path, force }) => init_config(&settings, &path, force)?,
        command => dispatch(command, &ctx, &mut session).await?,
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Run one command. `Ok(false)` means the action failed after the user was told why.
async fn dispatch(command: Command, ctx: &ScreenContext, session: &mut SessionStore) -> anyhow::Result<bool> {
    match command {
        Command::Login { user_id, password } => login(ctx, session, user_id, password).await,
        Command::Logout => {
            session.logout()?;
            println!("Signed out.");
            Ok(true)
        }
        Command::Whoami => match settle(DashboardView::mount(session)) {
            Some(view) => {
                println!("{}", view);
                Ok(true)
            }
            None => Ok(false),
        },
        Command::Menu => {
            if let Some(banner) = handlers::splash(session) {
                println!("{}\n", banner);
            }
            for item in handlers::navigation(session) {
                println!("{:<20} {}", item.label, item.route);
            }
            Ok(true)
        }
        Command::Videos(command) => videos(command, ctx, session).await,
        Command::Contacts(command) => contacts(command, ctx, session).await,
        Command::Users(command) => users(command, ctx, session).await,
        Command::Comments(command) => comments(command, ctx, session).await,
        Command::Testimonials => {
            let view = TestimonialsView::load(ctx).await;
            if view.comments.is_empty() {
                println!("No testimonials yet.");
            }
            for comment in &view.comments {
                println!("{} {}", comment.stars(), comment.commenter_name);
                println!("  \"{}\"", comment.comment_text);
            }
            Ok(true)
        }
        Command::Products => match ProductCatalog::load(ctx, session).await {
            Ok(catalog) => {
                for video in &catalog.products {
                    println!("#{:<4} {}", video.video_number, video.title);
                    println!("      {}", helpers::truncate_text(&video.short_description, 100));
                    for feature in &video.features {
                        println!("      - {}", feature);
                    }
                }
                if catalog.hidden() > 0 {
                    println!("{} more available with an upgraded account.", catalog.hidden());
                }
                Ok(true)
            }
            Err(_) => Ok(false),
        },
        Command::Contact(args) => {
            let target = if args.submission { ContactTarget::ContactPage } else { ContactTarget::Landing };
            let request = PublicContactRequest {
                name: args.name,
                company: args.company,
                email: args.email,
                role: args.role,
                message: args.message,
            };
            Ok(ContactFormScreen::new(ctx, target).submit(&request).await.is_ok())
        }
        Command::Config(_) => Ok(true),
    }
}

async fn login(ctx: &ScreenContext, session: &mut SessionStore, user_id: String, password: Option<String>) -> anyhow::Result<bool> {
    let Some(mut screen) = settle(LoginScreen::mount(ctx, session)) else {
        return Ok(false);
    };

    let password = match password {
        Some(password) => password,
        None => read_password()?,
    };
    screen.form_mut().set("user_id", user_id)?;
    screen.form_mut().set("password", password)?;

    match screen.submit(session).await? {
        Route::Home => Ok(true),
        _ => {
            if let Some(error) = screen.error() {
                debug!(error = error, "Login rejected");
            }
            Ok(false)
        }
    }
}

fn read_password() -> anyhow::Result<String> {
    use std::io::{BufRead, Write};
    print!("Password: ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Unwrap a mounted screen, explaining redirects and denials
fn settle<T>(mounted: Mounted<T>) -> Option<T> {
    match mounted {
        Mounted::Screen(screen) => Some(screen),
        Mounted::Redirect(Route::Login) => {
            eprintln!("Please sign in first: rakan-admin login <USER_ID>");
            None
        }
        Mounted::Redirect(route) => {
            eprintln!("Nothing to do here; continue at {}", route);
            None
        }
        Mounted::Denied(reason) => {
            eprintln!("Access denied: {}", reason);
            None
        }
    }
}

/// Library errors were already reported through the notifier
fn reported(result: rakan_admin::Result<bool>) -> bool {
    result.unwrap_or(false)
}

async fn videos(command: VideoCommand, ctx: &ScreenContext, session: &SessionStore) -> anyhow::Result<bool> {
    match command {
        VideoCommand::List { search, all } => {
            let Ok(mounted) = VideosScreen::mount(ctx, session).await else {
                return Ok(false);
            };
            let Some(mut screen) = settle(mounted) else {
                return Ok(false);
            };
            if all {
                screen.set_active_only(false);
            }
            if let Some(term) = search {
                screen.set_search(&term);
            }
            for video in screen.visible() {
                println!(
                    "{:>5}  #{:<4} {:<8} {}",
                    video.id,
                    video.video_number,
                    video.status_label(),
                    helpers::truncate_text(&video.title, 60)
                );
            }
            Ok(true)
        }
        VideoCommand::Show { id } => {
            let Ok(mounted) = VideoDetail::mount(ctx, session, id).await else {
                return Ok(false);
            };
            let Some(detail) = settle(mounted) else {
                return Ok(false);
            };
            let video = &detail.video;
            println!("{} (#{})", video.title, video.video_number);
            println!("Status:      {}", video.status_label());
            println!("Format:      {}", detail.format());
            println!("Added:       {}", detail.age.as_deref().unwrap_or("N/A"));
            println!("Photo:       {}", detail.urls.photo_url.as_deref().unwrap_or("N/A"));
            println!("Video:       {}", detail.urls.video_url.as_deref().unwrap_or("N/A"));
            println!();
            println!("{}", video.short_description);
            if let Some(long) = video.long_description.as_deref().filter(|d| !d.is_empty()) {
                println!();
                println!("{}", long);
            }
            Ok(true)
        }
        VideoCommand::Add(fields) => {
            let Some(mut editor) = settle(VideoEditor::create(ctx, session)) else {
                return Ok(false);
            };
            fill_video_form(&mut editor, fields).await?;
            Ok(editor.submit().await.is_ok())
        }
        VideoCommand::Edit { id, fields, active, inactive } => {
            let Ok(mounted) = VideoEditor::edit(ctx, session, id).await else {
                return Ok(false);
            };
            let Some(mut editor) = settle(mounted) else {
                return Ok(false);
            };
            fill_video_form(&mut editor, fields).await?;
            if active || inactive {
                editor.form_mut().set("is_active", active.to_string())?;
            }
            Ok(editor.submit().await.is_ok())
        }
        VideoCommand::Toggle { id } => {
            let Ok(mounted) = VideosScreen::mount(ctx, session).await else {
                return Ok(false);
            };
            let Some(mut screen) = settle(mounted) else {
                return Ok(false);
            };
            Ok(screen.toggle_status(id).await.is_ok())
        }
        VideoCommand::Delete { id } => {
            let Ok(mounted) = VideosScreen::mount(ctx, session).await else {
                return Ok(false);
            };
            let Some(mut screen) = settle(mounted) else {
                return Ok(false);
            };
            screen.set_active_only(false);
            Ok(reported(screen.delete(id).await))
        }
    }
}

async fn fill_video_form(editor: &mut VideoEditor, fields: VideoArgs) -> anyhow::Result<()> {
    let form = editor.form_mut();
    let text_fields = [
        ("title", fields.title),
        ("short_description", fields.short_description),
        ("long_description", fields.long_description),
        ("video_number", fields.video_number),
    ];
    for (name, value) in text_fields {
        if let Some(value) = value {
            form.set(name, value)?;
        }
    }
    if let Some(path) = fields.photo {
        editor.attach_path("photo_file", &path).await?;
    }
    if let Some(path) = fields.video {
        editor.attach_path("video_file", &path).await?;
    }
    Ok(())
}

async fn contacts(command: ContactCommand, ctx: &ScreenContext, session: &SessionStore) -> anyhow::Result<bool> {
    let Ok(mounted) = ContactsScreen::mount(ctx, session).await else {
        return Ok(false);
    };
    let Some(mut screen) = settle(mounted) else {
        return Ok(false);
    };

    match command {
        ContactCommand::List { search } => {
            if let Some(term) = search {
                screen.set_search(&term);
            }
            for submission in screen.visible() {
                println!(
                    "{:>5}  {:<24} {:<28} {}",
                    submission.id,
                    submission.name,
                    submission.email,
                    helpers::format_date(submission.created_at)
                );
                println!("       {}", helpers::truncate_text(&submission.message, 80));
            }
            Ok(true)
        }
        ContactCommand::Edit { id, name, email, company, role, message } => {
            let mut draft = screen.draft(id)?;
            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(email) = email {
                draft.email = email;
            }
            if company.is_some() {
                draft.company = company;
            }
            if role.is_some() {
                draft.role = role;
            }
            if let Some(message) = message {
                draft.message = message;
            }
            Ok(screen.update(id, &draft).await.is_ok())
        }
        ContactCommand::Delete { id } => Ok(reported(screen.delete(id).await)),
        ContactCommand::Reply { id, subject, message } => {
            Ok(screen.reply(id, &ContactReply { subject, message }).await.is_ok())
        }
    }
}

async fn users(command: UserCommand, ctx: &ScreenContext, session: &SessionStore) -> anyhow::Result<bool> {
    let Ok(mounted) = UsersScreen::mount(ctx, session).await else {
        return Ok(false);
    };
    let Some(mut screen) = settle(mounted) else {
        return Ok(false);
    };
    let now = Utc::now();

    match command {
        UserCommand::List { search, status } => {
            if let Some(raw) = status {
                let status = ApprovalStatus::parse(&raw)
                    .ok_or_else(|| AdminError::InvalidInput(format!("Unknown status: {}", raw)))?;
                screen.set_status_filter(Some(status), now);
            }
            if let Some(term) = search {
                screen.set_search(&term);
            }
            for user in screen.visible() {
                println!(
                    "{:>5}  {:<14} {:<28} {:<9} {}",
                    user.id,
                    user.telegram_user_id,
                    helpers::truncate_text(&user.display_name(), 28),
                    user.approval_status(now).label(),
                    helpers::format_date(user.approved_to)
                );
            }
            Ok(true)
        }
        UserCommand::Stats => {
            let stats = screen.stats();
            println!("Total users:    {}", stats.total_users);
            println!("Administrators: {}", stats.admin_users);
            println!("Approved:       {}", stats.approved_users);
            println!("Pending:        {}", stats.pending_users);
            Ok(true)
        }
        UserCommand::Edit { id, username, first_name, last_name, email, phone, account_type, admin } => {
            let mut draft = screen.draft(id)?;
            if username.is_some() {
                draft.username = username;
            }
            if first_name.is_some() {
                draft.first_name = first_name;
            }
            if last_name.is_some() {
                draft.last_name = last_name;
            }
            if email.is_some() {
                draft.email = email;
            }
            if phone.is_some() {
                draft.phone_number = phone;
            }
            if account_type.is_some() {
                draft.account_type = account_type;
            }
            if let Some(admin) = admin {
                draft.is_admin = admin;
            }
            Ok(screen.update(id, &draft).await.is_ok())
        }
        UserCommand::Delete { id } => Ok(reported(screen.delete(id).await)),
        UserCommand::Approve { ids } => bulk(&mut screen, &ids, true).await,
        UserCommand::Revoke { ids } => bulk(&mut screen, &ids, false).await,
    }
}

async fn bulk(screen: &mut UsersScreen, ids: &[i64], approved: bool) -> anyhow::Result<bool> {
    for id in ids {
        if screen.screen().list().get(*id).is_none() {
            eprintln!("Unknown user id: {}", id);
            return Ok(false);
        }
        if !screen.screen().list().is_selected(*id) {
            screen.toggle_selected(*id);
        }
    }
    Ok(screen.bulk_approve(approved).await.is_ok())
}

async fn comments(command: CommentCommand, ctx: &ScreenContext, session: &SessionStore) -> anyhow::Result<bool> {
    let Ok(mounted) = CommentsScreen::mount(ctx, session).await else {
        return Ok(false);
    };
    let Some(mut screen) = settle(mounted) else {
        return Ok(false);
    };

    match command {
        CommentCommand::List { search, stars } => {
            screen.set_star_filter(stars)?;
            if let Some(term) = search {
                screen.set_search(&term);
            }
            for comment in screen.visible() {
                println!(
                    "{:>5}  {} {:<24} {}",
                    comment.id,
                    comment.stars(),
                    comment.commenter_name,
                    helpers::truncate_text(&comment.comment_text, 60)
                );
            }
            Ok(true)
        }
        CommentCommand::Delete { id } => Ok(reported(screen.delete(id).await)),
    }
}

fn init_config(settings: &Settings, path: &Path, force: bool) -> anyhow::Result<bool> {
    if path.exists() && !force {
        eprintln!("{} already exists; pass --force to overwrite", path.display());
        return Ok(false);
    }
    std::fs::write(path, settings.to_toml()?).with_context(|| format!("failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(true)
}
