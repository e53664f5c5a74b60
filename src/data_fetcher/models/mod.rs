pub mod linescore;
pub mod schedule;
pub mod seasons;
pub mod teams;

pub use linescore::{LinescoreResponse, LinescoreSide, LinescoreTeams};
pub use schedule::{
    GameTeamSide, GameTeams, LeagueRecord, ScheduleDate, ScheduleGame, ScheduleResponse, TeamRef,
};
pub use seasons::{ApiSeason, SeasonsResponse};
pub use teams::{ApiTeam, TeamsResponse};
