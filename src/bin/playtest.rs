//! Headless Playtest
//!
//! Plays one game with a scripted player on the virtual clock and reports the
//! summary, unlocked achievements and collectible odds. With `--player` it
//! also requests the result and leaderboard proofs from `--signer-url` (or
//! `SIGNER_URL`).

use clap::{Parser, ValueEnum};
use onematch::achievements::{self, nft_drop_chance, AchievementInput};
use onematch::core::error::{MatchError, Result};
use onematch::core::types::{CardId, Difficulty};
use onematch::game::{format_time, GameSession, SessionSummary};
use onematch::proof::ProofClient;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Strategy {
    /// Always flips a known pair
    Perfect,
    /// Remembers a partner only some of the time
    Forgetful,
}

/// Headless Playtest - scripted games for tuning and smoke tests
#[derive(Parser, Debug)]
#[command(name = "playtest")]
#[command(about = "Play a scripted game and report score, achievements and proofs")]
struct Args {
    /// Difficulty: easy, medium, hard (or 1-3)
    #[arg(long, default_value = "easy")]
    difficulty: Difficulty,

    #[arg(long, value_enum, default_value = "perfect")]
    strategy: Strategy,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Thinking time before each flip, in milliseconds
    #[arg(long, default_value_t = 1200)]
    think_ms: u64,

    /// Chance that the forgetful player remembers a partner card
    #[arg(long, default_value_t = 0.6)]
    recall: f64,

    /// Signing service to request proofs from (defaults to SIGNER_URL)
    #[arg(long)]
    signer_url: Option<String>,

    /// Player address (hex) used for proof requests
    #[arg(long)]
    player: Option<String>,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    seed: u64,
    summary: SessionSummary,
    achievements: Vec<&'static str>,
    achievement_bonus: u64,
    nft_drop_chance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    proofs: Option<Proofs>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Proofs {
    game_result: String,
    leaderboard: String,
    /// Achievements as reported by the signing service
    remote_achievements: Vec<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("onematch=info")
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    let summary = play(&args, &mut rng);

    let input = AchievementInput::from(&summary);
    let unlocked = achievements::evaluate(&input);
    let mut report = Report {
        seed,
        summary,
        achievements: unlocked.iter().map(|a| a.kind.as_str()).collect(),
        achievement_bonus: achievements::achievement_bonus(unlocked.iter().copied()),
        nft_drop_chance: nft_drop_chance(summary.score, summary.difficulty),
        proofs: None,
    };

    if let Some(player) = &args.player {
        let client = match &args.signer_url {
            Some(url) => ProofClient::new(url.as_str()),
            None => ProofClient::from_env(),
        };
        tracing::info!("Requesting proofs from {}", client.base_url());
        match request_proofs(&client, player, &summary, &input) {
            Ok(proofs) => {
                if proofs.remote_achievements != report.achievements {
                    tracing::warn!(
                        "Signer reports achievements {:?}, local evaluation {:?}",
                        proofs.remote_achievements,
                        report.achievements
                    );
                }
                report.proofs = Some(proofs);
            }
            Err(e) => {
                eprintln!("Proof request failed: {}", e);
                std::process::exit(1);
            }
        }
    }

    if args.format == "json" {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to serialize report: {}", e),
        }
    } else {
        print_text(&report);
    }
}

fn play(args: &Args, rng: &mut StdRng) -> SessionSummary {
    let mut session = GameSession::deal(args.difficulty, rng);
    session.start();

    loop {
        if let Some(summary) = session.summary() {
            return summary;
        }

        session.advance(args.think_ms);
        let Some(first) = pick_face_down(&session, None, rng) else {
            // Nothing left to flip; only the countdown can end the game now
            session.advance(1000);
            continue;
        };
        session.flip(first);

        session.advance(args.think_ms);
        let remembers = match args.strategy {
            Strategy::Perfect => true,
            Strategy::Forgetful => rng.gen_bool(args.recall.clamp(0.0, 1.0)),
        };
        let second = if remembers {
            partner_of(&session, first)
        } else {
            pick_face_down(&session, Some(first), rng)
        };
        if let Some(second) = second {
            session.flip(second);
        }
        settle(&mut session);
    }
}

/// Run the clock until the pending pair resolves
fn settle(session: &mut GameSession) {
    while session.has_pending_pair() {
        match session.next_event_in_ms() {
            Some(ms) => session.advance(ms.max(1)),
            None => break,
        }
    }
}

fn pick_face_down(
    session: &GameSession,
    except: Option<CardId>,
    rng: &mut StdRng,
) -> Option<CardId> {
    let candidates: Vec<CardId> = session
        .state()
        .cards
        .iter()
        .filter(|c| !c.is_matched && !c.is_flipped && Some(c.unique_id) != except)
        .map(|c| c.unique_id)
        .collect();
    candidates.choose(rng).copied()
}

fn partner_of(session: &GameSession, id: CardId) -> Option<CardId> {
    let card = session.card(id)?;
    session
        .state()
        .cards
        .iter()
        .find(|c| c.pair_id == card.pair_id && c.unique_id != id)
        .map(|c| c.unique_id)
}

fn request_proofs(
    client: &ProofClient,
    player: &str,
    summary: &SessionSummary,
    input: &AchievementInput,
) -> Result<Proofs> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async {
        let game_result = client
            .sign_game_result(player, summary.score, summary.difficulty, summary.won)
            .await?;
        let leaderboard = client
            .sign_leaderboard_score(player, summary.score, summary.difficulty)
            .await?;
        let remote_achievements = client.check_achievements(input).await?;
        Ok::<_, MatchError>(Proofs {
            game_result,
            leaderboard,
            remote_achievements,
        })
    })
}

fn print_text(report: &Report) {
    let s = &report.summary;
    println!("\n=== ONEMATCH PLAYTEST (seed {}) ===", report.seed);
    println!("Difficulty: {}", s.difficulty);
    println!("Outcome:    {}", if s.won { "WON" } else { "LOST" });
    println!("Score:      {}", s.score);
    println!("Time:       {}", format_time(s.time_taken));
    println!(
        "Moves:      {} ({} mistakes, {} pairs)",
        s.moves, s.mistakes, s.matched_pairs
    );
    println!("Perfect:    {}", s.is_perfect);
    println!();
    if report.achievements.is_empty() {
        println!("No achievements unlocked");
    } else {
        println!("Achievements (+{} bonus):", report.achievement_bonus);
        for name in &report.achievements {
            println!("  - {}", name);
        }
    }
    println!("NFT drop chance: {:.0}%", report.nft_drop_chance * 100.0);
    if let Some(proofs) = &report.proofs {
        println!();
        println!("Game result signature: {}", proofs.game_result);
        println!("Leaderboard signature: {}", proofs.leaderboard);
        println!("Signer achievements:   {}", proofs.remote_achievements.join(", "));
    }
}
