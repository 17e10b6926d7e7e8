//! Screen state and key handling
//!
//! Every engine gets its own [`Host`]; the main loop calls [`App::pump`] to
//! feed due ticks and scheduled messages back into `update`.

use crate::config::DemoConfig;
use crate::host::Host;
use climate_ai::{
    AiClient, AiConfig, ChatSession, Difficulty, Error as AiError, FileStore, KnowledgeBase,
    QuizRequest, ERROR_REPLY, QUICK_QUESTIONS,
};
use climate_core::footprint::{Field, Step};
use climate_core::quiz::{QuizPhase, NOTIFICATION_DURATION};
use climate_core::sorting::{Bin, SortingPhase};
use climate_core::{
    CalculatorWizard, GameRng, Notification, QuizMsg, QuizSession, SortingMsg, SortingSession,
};
use climate_site::{ShareLink, SiteOrigin, DEFAULT_QR_SIZE};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

type BoxError = Box<dyn std::error::Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Quiz,
    Sorting,
    Calculator,
    Chat,
    Share,
}

impl Screen {
    /// Entries of the main menu, in order
    pub const MENU: [Screen; 5] = [
        Screen::Quiz,
        Screen::Sorting,
        Screen::Calculator,
        Screen::Chat,
        Screen::Share,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Menu => "Main Menu",
            Screen::Quiz => "Climate Quiz",
            Screen::Sorting => "Waste Sorting",
            Screen::Calculator => "Carbon Calculator",
            Screen::Chat => "Climate Assistant",
            Screen::Share => "Share",
        }
    }
}

/// A line typed into the chat box
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Ask(String),
    /// `/1`..`/4` pick a suggested question
    Quick(usize),
    SetKey(String),
    SetUrl(String),
    SetModel(String),
    Save,
    Clear,
    GenerateQuiz {
        topic: String,
        difficulty: Difficulty,
    },
    Unknown(String),
}

impl ChatCommand {
    pub fn parse(line: &str) -> ChatCommand {
        let line = line.trim();
        let Some(rest) = line.strip_prefix('/') else {
            return ChatCommand::Ask(line.to_string());
        };
        let (name, arg) = match rest.split_once(' ') {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };
        match name {
            "key" => ChatCommand::SetKey(arg.to_string()),
            "url" => ChatCommand::SetUrl(arg.to_string()),
            "model" => ChatCommand::SetModel(arg.to_string()),
            "save" => ChatCommand::Save,
            "clear" => ChatCommand::Clear,
            "quiz" => {
                let (topic, difficulty) = match arg.rsplit_once(' ') {
                    Some((topic, last)) => match parse_difficulty(last) {
                        Some(difficulty) => (topic.trim(), difficulty),
                        None => (arg, Difficulty::default()),
                    },
                    None => (arg, Difficulty::default()),
                };
                ChatCommand::GenerateQuiz {
                    topic: topic.to_string(),
                    difficulty,
                }
            }
            n => match n.parse::<usize>() {
                Ok(i) if (1..=QUICK_QUESTIONS.len()).contains(&i) => ChatCommand::Quick(i - 1),
                _ => ChatCommand::Unknown(name.to_string()),
            },
        }
    }
}

fn parse_difficulty(word: &str) -> Option<Difficulty> {
    Difficulty::ALL
        .into_iter()
        .find(|d| d.as_str().eq_ignore_ascii_case(word))
}

/// Popup shown until its deadline
pub struct Toast {
    pub notification: Notification,
    pub until: Instant,
}

pub struct App {
    pub screen: Screen,
    pub menu_index: usize,
    pub quiz: QuizSession,
    quiz_host: Host<QuizMsg>,
    pub sorting: SortingSession,
    sorting_host: Host<SortingMsg>,
    pub wizard: CalculatorWizard,
    pub field_index: usize,
    pub chat: ChatSession,
    pub ai_config: AiConfig,
    pub input: String,
    /// One-line status under the current screen
    pub status: Option<String>,
    pub toasts: Vec<Toast>,
    pub share_links: Vec<ShareLink>,
    /// "Did you know?" line on the menu
    pub fact: Option<String>,
    store: FileStore,
    knowledge: KnowledgeBase,
    runtime: tokio::runtime::Runtime,
    quit: bool,
}

impl App {
    pub fn new(config: &DemoConfig, seed: u64) -> Result<Self, BoxError> {
        let store = FileStore::open(&config.credentials_file)?;
        let origin = SiteOrigin::parse(&config.site_origin)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let knowledge = KnowledgeBase::builtin()?;
        let fact = knowledge
            .random_fact(&mut GameRng::new(seed.rotate_left(17)))
            .map(str::to_string);

        Ok(Self {
            screen: Screen::Menu,
            menu_index: 0,
            quiz: QuizSession::builtin()?,
            quiz_host: Host::new(),
            sorting: SortingSession::builtin(seed)?,
            sorting_host: Host::new(),
            wizard: CalculatorWizard::new(),
            field_index: 0,
            chat: ChatSession::new(),
            ai_config: AiConfig::load_or_default(&store),
            input: String::new(),
            status: None,
            toasts: Vec::new(),
            share_links: origin.share_links(DEFAULT_QR_SIZE)?,
            fact,
            store,
            knowledge,
            runtime,
            quit: false,
        })
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Deliver due timer ticks and scheduled messages; true if anything ran
    pub fn pump(&mut self, now: Instant) -> bool {
        let mut changed = false;

        for msg in self.quiz_host.due(now, QuizMsg::Tick) {
            self.send_quiz(msg, now);
            changed = true;
        }
        for msg in self.sorting_host.due(now, SortingMsg::Tick) {
            self.send_sorting(msg, now);
            changed = true;
        }

        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.until > now);
        changed || before != self.toasts.len()
    }

    fn send_quiz(&mut self, msg: QuizMsg, now: Instant) {
        let cmd = self.quiz.update(msg);
        self.quiz_host.execute(cmd, now);
        collect_toasts(&mut self.quiz_host, &mut self.toasts, now);
    }

    fn send_sorting(&mut self, msg: SortingMsg, now: Instant) {
        let cmd = self.sorting.update(msg);
        self.sorting_host.execute(cmd, now);
        collect_toasts(&mut self.sorting_host, &mut self.toasts, now);
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return;
        }
        if key.code == KeyCode::Esc {
            self.leave_screen(now);
            return;
        }

        match self.screen {
            Screen::Menu => self.menu_key(key.code),
            Screen::Quiz => self.quiz_key(key.code, now),
            Screen::Sorting => self.sorting_key(key.code, now),
            Screen::Calculator => self.calculator_key(key.code),
            Screen::Chat => self.chat_key(key.code),
            Screen::Share => {}
        }
    }

    fn leave_screen(&mut self, now: Instant) {
        match self.screen {
            Screen::Menu => {
                self.quit = true;
                return;
            }
            Screen::Quiz => {
                self.send_quiz(QuizMsg::Quit, now);
                self.quiz_host.clear();
            }
            Screen::Sorting => {
                self.send_sorting(SortingMsg::Quit, now);
                self.sorting_host.clear();
            }
            Screen::Calculator | Screen::Chat | Screen::Share => {}
        }
        tracing::debug!(from = self.screen.title(), "back to menu");
        self.screen = Screen::Menu;
        self.status = None;
        self.toasts.clear();
    }

    fn menu_key(&mut self, code: KeyCode) {
        let entries = Screen::MENU.len();
        match code {
            KeyCode::Up => self.menu_index = (self.menu_index + entries - 1) % entries,
            KeyCode::Down => self.menu_index = (self.menu_index + 1) % entries,
            KeyCode::Enter => self.open(Screen::MENU[self.menu_index]),
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char(c) => {
                if let Some(screen) = c
                    .to_digit(10)
                    .and_then(|d| (d as usize).checked_sub(1))
                    .and_then(|i| Screen::MENU.get(i))
                {
                    self.open(*screen);
                }
            }
            _ => {}
        }
    }

    fn open(&mut self, screen: Screen) {
        tracing::info!(screen = screen.title(), "screen opened");
        self.screen = screen;
        self.status = None;
    }

    fn quiz_key(&mut self, code: KeyCode, now: Instant) {
        let msg = match (self.quiz.phase(), code) {
            (QuizPhase::Menu, KeyCode::Enter) => QuizMsg::Start,
            (QuizPhase::Playing, KeyCode::Char(c @ '1'..='4')) => {
                QuizMsg::Answer(c as usize - '1' as usize)
            }
            (QuizPhase::Playing, KeyCode::Enter | KeyCode::Char('n')) => QuizMsg::Next,
            (QuizPhase::Results, KeyCode::Char('r')) => QuizMsg::Restart,
            _ => return,
        };
        self.send_quiz(msg, now);
    }

    fn sorting_key(&mut self, code: KeyCode, now: Instant) {
        let msg = match (self.sorting.phase(), code) {
            (SortingPhase::Menu, KeyCode::Enter) => SortingMsg::Start,
            (SortingPhase::Playing, KeyCode::Char(c)) => match bin_for_key(c) {
                Some(bin) => SortingMsg::Sort(bin),
                None => return,
            },
            (SortingPhase::Results, KeyCode::Char('r')) => SortingMsg::Restart,
            _ => return,
        };
        self.send_sorting(msg, now);
    }

    pub fn current_fields(&self) -> &'static [Field] {
        self.wizard.current_step().fields()
    }

    fn calculator_key(&mut self, code: KeyCode) {
        if self.wizard.result().is_some() {
            if code == KeyCode::Char('r') {
                self.wizard.reset();
                self.field_index = 0;
            }
            return;
        }

        let fields = self.current_fields();
        match code {
            KeyCode::Up => self.field_index = self.field_index.saturating_sub(1),
            KeyCode::Down => self.field_index = (self.field_index + 1).min(fields.len() - 1),
            KeyCode::Left | KeyCode::Right => {
                if let Some(field) = fields.get(self.field_index) {
                    self.wizard.adjust(*field, code == KeyCode::Right);
                }
            }
            KeyCode::Enter => {
                self.wizard.next();
                self.field_index = 0;
            }
            KeyCode::Backspace => {
                if self.wizard.back() {
                    self.field_index = 0;
                }
            }
            _ => {}
        }
    }

    fn chat_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => self.input.push(c),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter => {
                let line = std::mem::take(&mut self.input);
                if !line.trim().is_empty() {
                    self.run_chat_command(ChatCommand::parse(&line));
                }
            }
            _ => {}
        }
    }

    fn run_chat_command(&mut self, command: ChatCommand) {
        self.status = match command {
            ChatCommand::Ask(question) => self.ask(&question),
            ChatCommand::Quick(i) => self.ask(QUICK_QUESTIONS[i]),
            ChatCommand::SetKey(key) => {
                self.ai_config.api_key = key;
                Some("API key set; /save to keep it".to_string())
            }
            ChatCommand::SetUrl(url) => {
                self.ai_config.base_url = url;
                Some(format!("Base URL: {}", self.ai_config.base_url))
            }
            ChatCommand::SetModel(model) => {
                self.ai_config.model = model;
                Some(format!("Model: {}", self.ai_config.model))
            }
            ChatCommand::Save => match self.ai_config.save(&mut self.store) {
                Ok(()) => Some("Settings saved".to_string()),
                Err(e) => Some(e.to_string()),
            },
            ChatCommand::Clear => {
                self.chat.clear();
                None
            }
            ChatCommand::GenerateQuiz { topic, difficulty } => {
                self.generate_quiz(&topic, difficulty)
            }
            ChatCommand::Unknown(name) => Some(format!("Unknown command /{}", name)),
        };
    }

    fn client(&self) -> Result<AiClient, AiError> {
        AiClient::new(self.ai_config.clone(), &self.knowledge)
    }

    fn ask(&mut self, question: &str) -> Option<String> {
        let client = match self.client() {
            Ok(client) => client,
            Err(e) => {
                return Some(match self.knowledge.lookup_answer(question) {
                    Some(answer) => format!("{} (offline answer: {})", e, answer),
                    None => e.to_string(),
                })
            }
        };
        match self.runtime.block_on(self.chat.send(&client, question)) {
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "assistant request failed");
                Some(ERROR_REPLY.to_string())
            }
        }
    }

    fn generate_quiz(&mut self, topic: &str, difficulty: Difficulty) -> Option<String> {
        let request = QuizRequest::new(topic).with_difficulty(difficulty);
        let client = match self.client() {
            Ok(client) => client,
            Err(e) => return Some(e.to_string()),
        };
        let bank = match self.runtime.block_on(client.generate_bank(&request)) {
            Ok(bank) => bank,
            Err(e) => {
                tracing::warn!(error = %e, topic, "quiz generation failed");
                return Some(e.to_string());
            }
        };

        let count = bank.len();
        if self.quiz.use_bank(bank) {
            Some(format!(
                "Loaded {} {} questions about {}; open the quiz to play",
                count,
                difficulty.as_str(),
                topic
            ))
        } else {
            Some("Finish the current quiz first".to_string())
        }
    }

    pub fn step_label(&self) -> String {
        format!(
            "Step {} of {}: {}",
            self.wizard.step_index() + 1,
            Step::ALL.len(),
            self.wizard.current_step().title()
        )
    }
}

fn bin_for_key(c: char) -> Option<Bin> {
    match c {
        '1' | 'c' => Some(Bin::Compost),
        '2' | 'r' => Some(Bin::Recycle),
        '3' | 't' => Some(Bin::Trash),
        _ => None,
    }
}

fn collect_toasts<M>(host: &mut Host<M>, toasts: &mut Vec<Toast>, now: Instant) {
    for notification in host.take_notifications() {
        tracing::info!(title = %notification.title, "notification");
        toasts.push(Toast {
            notification,
            until: now + NOTIFICATION_DURATION,
        });
    }
}
