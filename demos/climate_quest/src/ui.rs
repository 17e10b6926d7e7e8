//! Terminal rendering

use crate::app::{App, Screen};
use climate_ai::Role;
use climate_core::footprint::FieldKind;
use climate_core::quiz::{Outcome, QuizPhase};
use climate_core::sorting::{Bin, SortingPhase};
use crossterm::{
    cursor::MoveTo,
    execute,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{Stdout, Write};

type RenderResult = Result<(), Box<dyn std::error::Error>>;

const RULE: &str = "════════════════════════════════════════════════════════════════════════";
const BAR_WIDTH: usize = 40;

pub fn render(stdout: &mut Stdout, app: &App) -> RenderResult {
    execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
    header(stdout, app.screen.title())?;

    match app.screen {
        Screen::Menu => render_menu(stdout, app)?,
        Screen::Quiz => render_quiz(stdout, app)?,
        Screen::Sorting => render_sorting(stdout, app)?,
        Screen::Calculator => render_calculator(stdout, app)?,
        Screen::Chat => render_chat(stdout, app)?,
        Screen::Share => render_share(stdout, app)?,
    }

    for toast in &app.toasts {
        execute!(
            stdout,
            Print("\n"),
            SetBackgroundColor(Color::DarkYellow),
            SetForegroundColor(Color::Black),
            Print(format!(
                "  🏆 {}: {}  ",
                toast.notification.title, toast.notification.message
            )),
            ResetColor
        )?;
    }

    if let Some(status) = &app.status {
        execute!(
            stdout,
            Print("\n\n"),
            SetForegroundColor(Color::Yellow),
            Print(format!("  {}\n", status)),
            ResetColor
        )?;
    }

    stdout.flush()?;
    Ok(())
}

fn header(stdout: &mut Stdout, title: &str) -> RenderResult {
    execute!(
        stdout,
        SetForegroundColor(Color::Green),
        Print(format!("{}\n", RULE)),
        Print(format!("  🌍 CLIMATE QUEST  ·  {}\n", title)),
        Print(format!("{}\n\n", RULE)),
        ResetColor
    )?;
    Ok(())
}

fn hint(stdout: &mut Stdout, text: &str) -> RenderResult {
    execute!(
        stdout,
        Print("\n"),
        SetForegroundColor(Color::DarkGrey),
        Print(format!("  {}\n", text)),
        ResetColor
    )?;
    Ok(())
}

/// Time bar coloured by the fraction left
fn time_bar(stdout: &mut Stdout, seconds: u32, fraction: f64) -> RenderResult {
    let fraction = fraction.clamp(0.0, 1.0);
    let filled = (fraction * BAR_WIDTH as f64) as usize;
    let color = if fraction > 0.5 {
        Color::Green
    } else if fraction > 0.2 {
        Color::Yellow
    } else {
        Color::Red
    };

    execute!(
        stdout,
        Print("  Time: "),
        SetForegroundColor(color),
        Print(format!("{:3}s ", seconds)),
        SetBackgroundColor(color),
        Print(" ".repeat(filled)),
        SetBackgroundColor(Color::DarkGrey),
        Print(" ".repeat(BAR_WIDTH - filled)),
        ResetColor,
        Print("\n\n")
    )?;
    Ok(())
}

fn render_menu(stdout: &mut Stdout, app: &App) -> RenderResult {
    for (i, screen) in Screen::MENU.iter().enumerate() {
        if i == app.menu_index {
            execute!(
                stdout,
                SetForegroundColor(Color::Black),
                SetBackgroundColor(Color::Green),
                Print(format!("  {}. {}  ", i + 1, screen.title())),
                ResetColor,
                Print("\n")
            )?;
        } else {
            execute!(stdout, Print(format!("  {}. {}\n", i + 1, screen.title())))?;
        }
    }
    if let Some(fact) = &app.fact {
        execute!(
            stdout,
            Print("\n"),
            SetForegroundColor(Color::Cyan),
            Print("  💡 Did you know? "),
            ResetColor,
            Print(format!("{}\n", fact))
        )?;
    }
    hint(stdout, "↑/↓ + Enter or 1-5 to choose | q or ESC to quit")
}

fn render_quiz(stdout: &mut Stdout, app: &App) -> RenderResult {
    let quiz = &app.quiz;
    match quiz.phase() {
        QuizPhase::Menu => {
            execute!(
                stdout,
                Print(format!("  {} questions, 30 seconds each, 3 lives.\n", quiz.bank().len())),
                Print("  Faster answers earn more points; streaks earn a bonus.\n")
            )?;
            hint(stdout, "Enter to start | ESC for menu")
        }
        QuizPhase::Playing => {
            let Some(question) = quiz.current_question() else {
                return Ok(());
            };
            execute!(
                stdout,
                Print(format!(
                    "  Question {}/{}   Score: ",
                    quiz.current_index() + 1,
                    quiz.bank().len()
                )),
                SetForegroundColor(Color::Cyan),
                Print(quiz.score()),
                ResetColor,
                Print("   Streak: "),
                SetForegroundColor(Color::Magenta),
                Print(quiz.streak()),
                ResetColor,
                Print("   Lives: "),
                SetForegroundColor(Color::Red),
                Print("♥".repeat(quiz.lives() as usize)),
                ResetColor,
                Print("\n\n")
            )?;
            time_bar(stdout, quiz.time_remaining(), quiz.time_fraction())?;
            execute!(
                stdout,
                SetForegroundColor(Color::White),
                Print(format!("  [{}] {}\n\n", question.category, question.question)),
                ResetColor
            )?;

            let outcome = quiz.current_outcome();
            for (i, option) in question.options.iter().enumerate() {
                let color = match outcome {
                    None => Color::Grey,
                    Some(_) if question.is_correct(i) => Color::Green,
                    Some(Outcome::Incorrect { selected }) if selected == i => Color::Red,
                    Some(_) => Color::DarkGrey,
                };
                execute!(
                    stdout,
                    SetForegroundColor(color),
                    Print(format!("    {}. {}\n", i + 1, option)),
                    ResetColor
                )?;
            }

            match outcome {
                None => hint(stdout, "1-4 to answer | ESC for menu"),
                Some(outcome) => {
                    let (color, verdict) = match outcome {
                        Outcome::Correct => (Color::Green, "✓ Correct!".to_string()),
                        Outcome::Incorrect { .. } => (
                            Color::Red,
                            format!("✗ Not quite. Answer: {}.", question.correct_option()),
                        ),
                        Outcome::TimedOut => (
                            Color::Red,
                            format!("⏰ Time's up! Answer: {}.", question.correct_option()),
                        ),
                    };
                    execute!(
                        stdout,
                        Print("\n"),
                        SetForegroundColor(color),
                        Print(format!("  {} ", verdict)),
                        ResetColor,
                        Print(format!("{}\n", question.explanation))
                    )?;
                    hint(stdout, "Enter for the next question | ESC for menu")
                }
            }
        }
        QuizPhase::Results => {
            let summary = quiz.summary();
            execute!(
                stdout,
                SetForegroundColor(Color::Cyan),
                Print(format!("  Grade {}  ", summary.grade)),
                ResetColor,
                Print(format!("{}\n\n", summary.message())),
                Print(format!("  Score:       {}\n", summary.score)),
                Print(format!(
                    "  Correct:     {}/{} ({}%)\n",
                    summary.correct, summary.total, summary.percentage
                )),
                Print(format!("  Best streak: {}\n", summary.max_streak)),
                Print(format!("  Lives left:  {}\n", summary.lives_left))
            )?;
            if !quiz.achievements().is_empty() {
                execute!(stdout, Print("\n  Achievements:\n"))?;
                for id in quiz.achievements().iter() {
                    execute!(
                        stdout,
                        SetForegroundColor(Color::Yellow),
                        Print(format!("    ★ {}", id.name())),
                        ResetColor,
                        Print(format!(" - {}\n", id.description()))
                    )?;
                }
            }
            hint(stdout, "r to play again | ESC for menu")
        }
    }
}

fn bin_color(bin: Bin) -> Color {
    match bin {
        Bin::Compost => Color::Green,
        Bin::Recycle => Color::Blue,
        Bin::Trash => Color::DarkGrey,
    }
}

fn render_sorting(stdout: &mut Stdout, app: &App) -> RenderResult {
    let game = &app.sorting;
    match game.phase() {
        SortingPhase::Menu => {
            execute!(
                stdout,
                Print("  Sort each item into the right bin before the minute runs out.\n"),
                Print("  Correct sorts score points; streaks score extra.\n")
            )?;
            hint(stdout, "Enter to start | ESC for menu")
        }
        SortingPhase::Playing => {
            execute!(
                stdout,
                Print(format!(
                    "  Item {}/{}   Score: ",
                    (game.current_index() + 1).min(game.items().len()),
                    game.items().len()
                )),
                SetForegroundColor(Color::Cyan),
                Print(game.score()),
                ResetColor,
                Print(format!("   Streak: {}\n\n", game.streak()))
            )?;
            time_bar(stdout, game.time_remaining(), game.time_fraction())?;

            if let Some(item) = game.current_item() {
                execute!(
                    stdout,
                    Print(format!("      {}  {}\n\n", item.emoji, item.name))
                )?;
            }

            for (i, bin) in Bin::ALL.iter().enumerate() {
                execute!(
                    stdout,
                    SetForegroundColor(bin_color(*bin)),
                    Print(format!("  {}. {:<14}", i + 1, bin.label())),
                    ResetColor,
                    Print(format!("{}\n", game.bin_contents(*bin).join(", ")))
                )?;
            }

            if let Some(feedback) = game.feedback() {
                let color = if feedback.correct {
                    Color::Green
                } else {
                    Color::Red
                };
                execute!(
                    stdout,
                    Print("\n"),
                    SetForegroundColor(color),
                    Print(format!("  {}\n", feedback.message)),
                    ResetColor
                )?;
            }
            if game.is_ended() {
                return hint(stdout, "Round over, tallying your score...");
            }
            hint(stdout, "1/c compost | 2/r recycle | 3/t trash | ESC for menu")
        }
        SortingPhase::Results => {
            let summary = game.summary();
            execute!(
                stdout,
                Print(format!("  Sorted correctly: {}/{}\n", summary.correct, summary.total)),
                Print(format!("  Score:            {}\n", summary.score))
            )?;
            hint(stdout, "r to play again | ESC for menu")
        }
    }
}

fn render_calculator(stdout: &mut Stdout, app: &App) -> RenderResult {
    let wizard = &app.wizard;

    if let Some(result) = wizard.result() {
        execute!(
            stdout,
            Print("  Your yearly footprint: "),
            SetForegroundColor(Color::Cyan),
            Print(format!("{} kg CO₂", result.total_kg_co2_per_year)),
            ResetColor,
            Print(format!("  ({})\n", result.tier)),
            Print(format!(
                "  Trees needed to offset it: {}\n\n",
                result.trees_to_offset
            ))
        )?;
        if !result.tips.is_empty() {
            execute!(stdout, Print("  Ways to cut it:\n"))?;
            for tip in &result.tips {
                execute!(
                    stdout,
                    SetForegroundColor(Color::Green),
                    Print(format!("    • [{}] ", tip.topic.icon())),
                    ResetColor,
                    Print(format!("{}\n", tip.text))
                )?;
            }
        }
        return hint(stdout, "r to start over | ESC for menu");
    }

    let filled = (wizard.progress_percent() / 100.0 * BAR_WIDTH as f64) as usize;
    execute!(
        stdout,
        Print(format!("  {}\n  ", app.step_label())),
        SetBackgroundColor(Color::Green),
        Print(" ".repeat(filled)),
        SetBackgroundColor(Color::DarkGrey),
        Print(" ".repeat(BAR_WIDTH - filled.min(BAR_WIDTH))),
        ResetColor,
        Print("\n\n")
    )?;

    for (i, field) in app.current_fields().iter().enumerate() {
        let value = match wizard.field_kind(*field) {
            FieldKind::Choice { options, selected } => {
                format!("‹ {} ›", options.get(selected).copied().unwrap_or(""))
            }
            FieldKind::Slider { value, range, unit } => {
                format!("‹ {} {} › ({}-{})", value, unit, range.min, range.max)
            }
        };
        let marker = if i == app.field_index { "▸" } else { " " };
        execute!(
            stdout,
            Print(format!("  {} {}\n", marker, field.prompt())),
            SetForegroundColor(if i == app.field_index {
                Color::Cyan
            } else {
                Color::Grey
            }),
            Print(format!("      {}\n\n", value)),
            ResetColor
        )?;
    }

    let next = if wizard.is_last_step() {
        "Enter to calculate"
    } else {
        "Enter for next step"
    };
    hint(
        stdout,
        &format!("↑/↓ field | ←/→ change | {} | Backspace back | ESC for menu", next),
    )
}

fn render_chat(stdout: &mut Stdout, app: &App) -> RenderResult {
    for message in app.chat.transcript() {
        let (color, who) = match message.role {
            Role::User => (Color::Cyan, "You"),
            Role::Assistant => (Color::Green, "Assistant"),
            Role::System => continue,
        };
        execute!(
            stdout,
            SetForegroundColor(color),
            Print(format!("  {}: ", who)),
            ResetColor,
            Print(format!("{}\n\n", message.content))
        )?;
    }

    if app.chat.transcript().len() == 1 {
        execute!(stdout, Print("  Try asking:\n"))?;
        for (i, question) in climate_ai::QUICK_QUESTIONS.iter().enumerate() {
            execute!(stdout, Print(format!("    /{} {}\n", i + 1, question)))?;
        }
        execute!(stdout, Print("\n"))?;
    }

    execute!(
        stdout,
        SetForegroundColor(Color::Yellow),
        Print("  > "),
        ResetColor,
        Print(&app.input),
        Print("\n")
    )?;
    hint(
        stdout,
        "/key /url /model /save settings | /quiz <topic> [easy|medium|hard] | /clear | ESC for menu",
    )
}

fn render_share(stdout: &mut Stdout, app: &App) -> RenderResult {
    for link in &app.share_links {
        execute!(
            stdout,
            SetForegroundColor(Color::Cyan),
            Print(format!("  {}\n", link.label)),
            ResetColor,
            Print(format!("    {}\n", link.description)),
            Print(format!("    Link: {}\n", link.url)),
            SetForegroundColor(Color::DarkGrey),
            Print(format!("    QR:   {}\n\n", link.image_url)),
            ResetColor
        )?;
    }
    hint(stdout, "ESC for menu")
}
