//! Catalogue of well-known CS2 console commands
//!
//! Documentation only. Nothing here restricts what may be sent over RCON.

use serde::Serialize;

/// A known command and what it does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommandDescriptor {
    pub name: &'static str,
    pub description: &'static str,
}

const fn cmd(name: &'static str, description: &'static str) -> CommandDescriptor {
    CommandDescriptor { name, description }
}

static COMMANDS: &[CommandDescriptor] = &[
    cmd("changelevel <map_name>", "Changes the current map."),
    cmd("mp_warmup_end", "Ends the warmup phase."),
    cmd("mp_restartgame 1", "Restarts the game after 1 second."),
    cmd("bot_kick", "Kicks all bots from the server."),
    cmd("bot_add_t", "Adds a bot to the Terrorist side."),
    cmd("bot_add_ct", "Adds a bot to the Counter-Terrorist side."),
    cmd("bot_quota <number>", "Sets the total number of bots."),
    cmd("mp_freezetime 15", "Sets the freeze time before rounds start (15 sec)."),
    cmd("mp_roundtime 1.92", "Sets the round duration to 1:55 minutes."),
    cmd("mp_maxrounds 24", "Sets the maximum number of rounds (MR24)."),
    cmd("mp_halftime 1", "Enables halftime after 12 rounds."),
    cmd("mp_buytime 20", "Sets how long players can buy weapons (20 sec)."),
    cmd("mp_startmoney 800", "Sets the starting money for players."),
    cmd("mp_overtime_enable 1", "Enables overtime if the match is tied."),
    cmd("mp_overtime_maxrounds 6", "Sets max rounds in overtime (MR6)."),
    cmd("mp_overtime_startmoney 12500", "Sets start money for overtime rounds."),
    cmd("mp_defuser_allocation 2", "Gives all CTs a defuse kit."),
    cmd("mp_limitteams 1", "Prevents unbalanced teams."),
    cmd("mp_autoteambalance 1", "Enables automatic team balancing."),
    cmd("mp_force_pick_time 5", "Time players have to pick a team."),
    cmd("mp_ignore_round_win_conditions 0", "Disables forced round end."),
    cmd("mp_death_drop_gun 1", "Allows players to drop their weapons on death."),
    cmd(
        "mp_t_default_grenades \"weapon_molotov;weapon_smokegrenade\"",
        "Sets default grenades for Ts.",
    ),
    cmd(
        "mp_ct_default_grenades \"weapon_incgrenade;weapon_smokegrenade\"",
        "Sets default grenades for CTs.",
    ),
    cmd("sv_cheats 0", "Disables cheats (must be 1 to enable commands like noclip)."),
    cmd("rcon_password <password>", "Sets the RCON password for remote control."),
    cmd("rcon <command>", "Runs a remote command on the server."),
    cmd("exec <config_name>", "Executes a config file (e.g., exec server.cfg)."),
    cmd("status", "Shows server status and player information."),
    cmd("kick <player_name or #userid>", "Kicks a player from the server."),
    cmd("banid <time> <steamID>", "Bans a player for a certain duration."),
    cmd("host_workshop_map <workshop_id>", "Loads a workshop map."),
    cmd("ds_workshop_listmaps", "Lists the maps in the hosted workshop collection."),
    cmd("ds_workshop_changelevel <map_name>", "Changes to a map from the hosted workshop collection."),
    cmd("mp_endmatch", "Ends the current match."),
    cmd("mp_pause_match", "Pauses the match."),
    cmd("mp_unpause_match", "Unpauses the match."),
    cmd("sv_alltalk 0", "Disables voice chat between teams."),
    cmd("mp_spectators_max 4", "Limits the number of spectators."),
    cmd("mp_forcecamera 1", "Restricts dead players' view to only their team."),
    cmd("sv_voiceenable 1", "Enables voice communication."),
    cmd("mp_respawn_immunitytime 0", "Disables spawn protection."),
    cmd("mp_display_kill_assists 1", "Enables assist tracking in scoreboard."),
    cmd("mp_randomspawn 0", "Ensures standard spawn locations."),
    cmd("sv_infinite_ammo 0", "Disables infinite ammo (1 for unlimited bullets)."),
    cmd("sv_grenade_trajectory 0", "Disables grenade trajectory lines."),
    cmd("sv_showimpacts 0", "Disables bullet impact visualization."),
    cmd("mp_warmuptime 60", "Sets warmup duration (60 sec)."),
    cmd("mp_suicide_penalty 0", "Removes suicide penalty."),
    cmd("mp_teammates_are_enemies 0", "Disables friendly fire (1 = FFA mode)."),
    cmd("mp_round_restart_delay 5", "Time before the next round starts (5 sec)."),
    cmd("mp_weapon_allow_glock 1", "Enables/disables specific weapons."),
    cmd("mp_c4timer 40", "Sets bomb timer duration (40 sec standard)."),
    cmd("mp_playercashawards 1", "Enables money rewards for player actions."),
    cmd("mp_teamcashawards 1", "Enables team-wide money rewards."),
    cmd("sv_matchpause_auto_5v5 1", "Enables auto-pause for 5v5 competitive."),
    cmd("mp_friendlyfire 1", "Enables friendly fire."),
    cmd("sv_competitive_minspec 1", "Forces minimum competitive settings."),
];

/// All known commands, in catalogue order
pub fn list_all() -> &'static [CommandDescriptor] {
    COMMANDS
}
