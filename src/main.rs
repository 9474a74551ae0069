//! Charforge - Character creation client for tabletop RPGs
//!
//! Charforge drives the character wizard against a remote backend:
//! - Keeps a durable, versioned wizard draft in local storage
//! - Loads races, classes and backgrounds from the game data API
//! - Submits finished characters and manages the saved roster

mod application;
mod domain;
mod infrastructure;

use anyhow::{bail, Context};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::application::services::{Adjustment, SubmissionError};
use crate::domain::services::ability_engine::{
    assigned_total, bonuses_for, can_decrease, can_increase, point_buy_remaining,
    source_values, unassigned_slots,
};
use crate::domain::services::{class_features, preview};
use crate::domain::value_objects::{format_modifier, CharacterId, ScoreMethod};
use crate::infrastructure::cli::DraftCommand;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::state::AppState;

const USAGE: &str = "\
usage: charforge <command>

commands:
  login <email> <password>   sign in and store tokens
  logout                     forget stored tokens
  whoami                     show the signed-in user
  catalog [refresh]          list races, classes and backgrounds
  draft                      show the current draft and its preview
  draft features             list class features unlocked so far
  draft <step> <value>       edit the draft, one wizard step at a time
  random                     fill the draft with random choices
  submit                     create a character from the draft
  reset                      abandon the current draft
  roster                     list saved characters
  delete <id>                delete a saved character
  share <id>                 toggle public sharing for a character

draft steps:
  name|gender|age|alignment|appearance|traits|ideals|bonds|flaws <text>
  ruleset <slug>             confirm
  race <slug>                subrace <slug>            custom-race <name>
  class add                  class remove <n>
  class set <n> <slug>       class level <n> <level>   class-name <name>
  background <slug>          skills <skill,skill,...>
  method standard|roll|pointbuy
  roll                       assign <slot> <ability>   clear <ability>
  buy <ability> <+1|-1>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "charforge=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!("Configuration loaded");
    tracing::info!("  API: {}", config.api_base_url);
    tracing::info!("  Storage: {:?}", config.storage);

    // Initialize application state
    let state = AppState::new(config).await?;
    state.session.initialize().await;
    state.wizard.load().await;
    tracing::info!("Application state initialized");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    match args.as_slice() {
        ["login", email, password] => {
            let user = state.session.login(email, password).await?;
            println!("Signed in as {}", user.username);
        }
        ["logout"] => state.session.logout().await,
        ["whoami"] => match state.session.current_user() {
            Some(user) => println!("{} <{}>", user.username, user.email),
            None => println!("Not signed in"),
        },
        ["catalog", rest @ ..] if rest.is_empty() || rest == ["refresh"] => {
            if !rest.is_empty() {
                state.catalog.invalidate().await;
            }
            state.catalog.fetch_all().await?;
            let catalog = state.catalog.snapshot().await;
            println!("Races:");
            for race in &catalog.races {
                println!("  {:<20} {}", race.slug, race.name);
            }
            println!("Classes:");
            for class in &catalog.classes {
                println!("  {:<20} {} (d{})", class.slug, class.name, class.hit_die);
            }
            println!("Backgrounds:");
            for background in &catalog.backgrounds {
                println!("  {:<20} {}", background.slug, background.name);
            }
        }
        ["draft"] => show_draft(&state).await,
        ["draft", "features"] => {
            state.catalog.fetch_all().await?;
            let catalog = state.catalog.snapshot().await;
            let draft = state.wizard.snapshot().await;
            for entry in &draft.class_entries {
                let Some(class) = catalog.class(&entry.class_slug) else {
                    continue;
                };
                println!("{} {}:", class.name, entry.level);
                for feature in &class_features(class, entry.level) {
                    println!("  {:>2} {}", feature.level, feature.name);
                    if !feature.description.is_empty() {
                        println!("     {}", feature.description);
                    }
                }
            }
        }
        ["draft", step @ ..] => {
            let command = DraftCommand::parse(step)?;
            if command.needs_catalog() {
                state.catalog.fetch_all().await?;
            }
            let catalog = state.catalog.snapshot().await;
            let outcome = state
                .wizard
                .edit(|store| command.apply(store, &catalog, &mut rand::thread_rng()))
                .await?;
            tracing::debug!(?command, accepted = outcome.is_accepted(), "Applied draft step");
            match outcome {
                Adjustment::Accepted => show_draft(&state).await,
                Adjustment::Rejected(reason) => bail!("Rejected: {reason}"),
            }
        }
        ["random"] => {
            state.catalog.fetch_all().await?;
            let catalog = state.catalog.snapshot().await;
            let outcome = state
                .wizard
                .edit(|store| {
                    store.random_fill(
                        &catalog.races,
                        &catalog.classes,
                        &catalog.backgrounds,
                        &mut rand::thread_rng(),
                    )
                })
                .await;
            if let Adjustment::Rejected(reason) = outcome {
                bail!("Random fill rejected: {reason}");
            }
            println!("Draft filled with random choices");
        }
        ["submit"] => {
            require_login(&state)?;
            if let Err(e) = state.catalog.fetch_all().await {
                tracing::warn!(error = %e, "Submitting without game data");
            }
            match state.submission.submit().await {
                Ok(character) => println!("Created {} ({})", character.name, character.id),
                Err(SubmissionError::Blocked(blockers)) => {
                    for blocker in blockers {
                        println!("Not ready: {blocker}");
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }
        ["reset"] => state.wizard.reset().await,
        ["roster"] => {
            require_login(&state)?;
            state.roster.refresh().await?;
            for character in state.roster.snapshot().await.characters {
                println!(
                    "{}  {:<24} level {:<2} {}",
                    character.id,
                    character.name,
                    character.level,
                    if character.is_public { "shared" } else { "" }
                );
            }
        }
        ["delete", id] => {
            require_login(&state)?;
            let id = parse_id(id)?;
            state.roster.delete(id).await?;
            println!("Deleted {id}");
        }
        ["share", id] => {
            require_login(&state)?;
            let id = parse_id(id)?;
            let share = state.roster.toggle_share(id).await?;
            if share.is_public {
                println!("Shared with token {}", share.share_token);
            } else {
                println!("Sharing disabled");
            }
        }
        _ => println!("{USAGE}"),
    }

    Ok(())
}

async fn show_draft(state: &AppState) {
    if let Err(e) = state.catalog.fetch_all().await {
        tracing::warn!(error = %e, "Showing draft without game data");
    }
    let catalog = state.catalog.snapshot().await;
    let draft = state.wizard.snapshot().await;
    let summary = preview(&draft, &catalog.classes, &catalog.backgrounds);

    println!("Name:       {}", draft.name);
    let lock = if state.wizard.ruleset_confirmed().await {
        " (confirmed)"
    } else {
        ""
    };
    println!("Ruleset:    {}{lock}", draft.ruleset_slug);
    println!("Race:       {}", catalog.race_name(&draft.race.submission_slug()));
    let bonuses = bonuses_for(&draft);
    if !bonuses.is_empty() {
        let listed: Vec<String> = bonuses
            .positive()
            .map(|(ability, bonus)| format!("{ability} {}", format_modifier(bonus)))
            .collect();
        println!("Bonuses:    {}", listed.join(", "));
    }
    for entry in &draft.class_entries {
        println!(
            "Class:      {} {}",
            catalog.class_name(&entry.class_slug),
            entry.level
        );
    }
    println!("Background: {}", catalog.background_name(&draft.background_slug));

    println!("Method:     {}", draft.score_method);
    match draft.score_method {
        ScoreMethod::PointBuy => {
            println!("  {} points left", point_buy_remaining(&draft));
        }
        ScoreMethod::Standard | ScoreMethod::Roll => {
            if let Some(values) = source_values(&draft) {
                let free: Vec<String> = unassigned_slots(&draft)
                    .into_iter()
                    .map(|slot| format!("{}:{}", slot + 1, values[slot]))
                    .collect();
                if !free.is_empty() {
                    let waiting: Vec<&str> = draft
                        .ability_slots
                        .unassigned_abilities()
                        .into_iter()
                        .map(|a| a.key())
                        .collect();
                    println!("  unassigned slots {}", free.join(" "));
                    println!("  waiting for a slot: {}", waiting.join(", "));
                }
            } else {
                println!("  nothing rolled yet");
            }
        }
    }
    for (ability, modifier) in summary.modifiers {
        let steps = if draft.score_method == ScoreMethod::PointBuy {
            format!(
                " {}{}",
                if can_decrease(&draft, ability) { "-" } else { " " },
                if can_increase(&draft, ability) { "+" } else { " " }
            )
        } else {
            String::new()
        };
        match assigned_total(&draft, ability) {
            Some(total) => println!(
                "  {ability} {total:>2} ({}){steps}",
                format_modifier(modifier)
            ),
            None => println!("  {ability} --"),
        }
    }
    println!(
        "Level {} / proficiency {}",
        summary.total_level,
        format_modifier(summary.proficiency_bonus)
    );
    println!("Estimated HP: {}", summary.estimated_hp);
    println!("Skills: {}", summary.skills.join(", "));
    for field in summary.missing {
        println!("Missing: {field}");
    }
}

fn require_login(state: &AppState) -> anyhow::Result<()> {
    if !state.session.is_authenticated() {
        bail!("Not signed in, run `charforge login <email> <password>` first");
    }
    Ok(())
}

fn parse_id(raw: &str) -> anyhow::Result<CharacterId> {
    raw.parse::<uuid::Uuid>()
        .map(CharacterId::from_uuid)
        .with_context(|| format!("Invalid character id: {raw}"))
}
