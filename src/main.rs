mod config;
mod quiz;

use std::sync::Arc;

use dotenv::dotenv;
use log::{error, info};
use quiz::{lexicon::Lexicon, PhraseGenerator, Session};
use rand::{rngs::StdRng, SeedableRng};
use teloxide::{
    dispatching::dialogue::{serializer::Json, ErasedStorage, SqliteStorage, Storage},
    prelude::*,
};

use crate::config::Config;

type QuizDialogue = Dialogue<State, ErasedStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
pub enum State {
    #[default]
    Start,
    Quiz {
        session: Session,
    },
}

type QuizStorage = std::sync::Arc<ErasedStorage<State>>;

#[tokio::main]
async fn main() {
    dotenv().ok();
    pretty_env_logger::init();
    info!("Starting adjective agreement bot...");

    let config = Config::from_env();

    // A lexicon that cannot serve every phrase pattern is fatal.
    let lexicon = match Lexicon::load(&config.lexicon) {
        Ok(lexicon) => lexicon,
        Err(e) => {
            error!("Failed to load the lexicon: {}", e);
            std::process::exit(1);
        }
    };
    let generator = Arc::new(PhraseGenerator::new(lexicon));

    info!("Opening dialogue storage at {}", config.database_path);
    let storage: QuizStorage = match SqliteStorage::open(&config.database_path, Json).await {
        Ok(storage) => storage.erase(),
        Err(e) => {
            error!("Failed to open {}: {}", config.database_path, e);
            std::process::exit(1);
        }
    };

    let bot = Bot::from_env();

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .enter_dialogue::<Message, ErasedStorage<State>, State>()
            .branch(dptree::case![State::Start].endpoint(start))
            .branch(dptree::case![State::Quiz { session }].endpoint(quiz_round)),
    )
    .dependencies(dptree::deps![storage, generator])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;
}

const GREETING_TEXT: &str = "Hej! Fill in the adjective so that it agrees with the noun phrase. \
The adjective is shown in its dictionary form before the colon.\n\n\
Send /skip for a new phrase.";

async fn start(
    bot: Bot,
    dialogue: QuizDialogue,
    generator: Arc<PhraseGenerator>,
    msg: Message,
) -> HandlerResult {
    bot.send_message(msg.chat.id, GREETING_TEXT).await?;

    let session = Session::start(&generator, &mut StdRng::from_entropy())?;
    bot.send_message(msg.chat.id, session.question.prompt())
        .await?;

    dialogue.update(State::Quiz { session }).await?;
    Ok(())
}

async fn quiz_round(
    bot: Bot,
    dialogue: QuizDialogue,
    generator: Arc<PhraseGenerator>,
    mut session: Session,
    msg: Message,
) -> HandlerResult {
    // Stickers, photos and the like count as an empty answer.
    let text = msg.text().unwrap_or_default();

    let reply = match text.trim() {
        "/start" => return start(bot, dialogue, generator, msg).await,
        "/skip" => {
            let skipped = session.question.expected_answer().to_string();
            session.skip(&generator, &mut StdRng::from_entropy())?;
            format!(
                "The answer was \"{}\". New phrase:\n\n{}",
                skipped,
                session.question.prompt()
            )
        }
        _ => {
            if session.submit(&generator, text, &mut StdRng::from_entropy())? {
                format!(
                    "Correct! ({} in a row)\n\n{}",
                    session.streak,
                    session.question.prompt()
                )
            } else {
                format!("Wrong, try again.\n\n{}", session.question.prompt())
            }
        }
    };

    bot.send_message(msg.chat.id, reply).await?;

    dialogue.update(State::Quiz { session }).await?;
    Ok(())
}
