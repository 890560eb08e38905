use std::path::PathBuf;

use clap::Parser;

/// CLI surface of the tournament administrator:
/// `santorini -cup <n>` or `santorini -league <n>`.
#[derive(Clone, Debug, Parser)]
#[command(name = "santorini")]
pub struct AdminOptions {
    /// Tournament mode, `-cup` or `-league`.
    #[arg(allow_hyphen_values = true)]
    pub mode: String,

    /// Number of remote players to wait for before starting.
    pub remote_players: usize,

    /// Path to the tournament configuration file. Long-only: a short `-c`
    /// would swallow the `-cup` mode token.
    #[arg(long, default_value = "santorini.config")]
    pub config: PathBuf,

    #[arg(long)]
    pub log_level: Option<String>,
}

/// The two bracket shapes a tournament can take.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TournamentKind {
    Cup,
    League,
}

impl AdminOptions {
    pub fn tournament(&self) -> anyhow::Result<TournamentKind> {
        match self.mode.as_str() {
            "-cup" => Ok(TournamentKind::Cup),
            "-league" => Ok(TournamentKind::League),
            other => Err(anyhow::anyhow!("unrecognized mode {other}, expected -cup or -league")),
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.tournament()?;
        if self.remote_players < 1 {
            return Err(anyhow::anyhow!("at least one remote player is required"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_parse_with_their_hyphens() {
        let options = AdminOptions::try_parse_from(["santorini", "-cup", "3"]).unwrap();
        assert_eq!(options.tournament().unwrap(), TournamentKind::Cup);
        assert_eq!(options.remote_players, 3);
        options.validate().unwrap();

        let options = AdminOptions::try_parse_from(["santorini", "-league", "2"]).unwrap();
        assert_eq!(options.tournament().unwrap(), TournamentKind::League);
    }

    #[test]
    fn bad_modes_and_counts_are_rejected() {
        let options = AdminOptions::try_parse_from(["santorini", "-ladder", "3"]).unwrap();
        assert!(options.validate().is_err());

        let options = AdminOptions::try_parse_from(["santorini", "-cup", "0"]).unwrap();
        assert!(options.validate().is_err());

        assert!(AdminOptions::try_parse_from(["santorini", "-cup", "many"]).is_err());
    }
}
