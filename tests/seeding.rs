//! Integration tests for the team pool and seed assignment.

use playoff_bracket_web::{
    read_teams_csv, resolve_team_pool, BracketError, SeedAssignment, SeedDraft, Team, SEED_COUNT,
};

fn ranked_teams(n: u32) -> Vec<Team> {
    (1..=n).map(|r| Team::ranked(format!("T{r}"), r)).collect()
}

#[test]
fn commit_accepts_twelve_distinct_teams() {
    let teams = ranked_teams(12);
    let seeding = SeedDraft::from_ranked(&teams).commit().unwrap();
    assert_eq!(seeding.team(1), Some(teams[0].id));
    assert_eq!(seeding.team(12), Some(teams[11].id));
    assert_eq!(seeding.team(0), None);
    assert_eq!(seeding.team(13), None);
    assert_eq!(seeding.seed_of(teams[4].id), Some(5));
}

#[test]
fn commit_rejects_empty_slot() {
    let teams = ranked_teams(11); // seed 12 stays empty
    let draft = SeedDraft::from_ranked(&teams);
    assert_eq!(draft.seeds[SEED_COUNT - 1], None);
    assert_eq!(draft.commit(), Err(BracketError::IncompleteSeeding));
}

#[test]
fn commit_rejects_duplicate_team() {
    let teams = ranked_teams(12);
    let mut draft = SeedDraft::from_ranked(&teams);
    draft.set(12, Some(teams[0].id)).unwrap();
    assert_eq!(draft.commit(), Err(BracketError::DuplicateSeed));
}

#[test]
fn set_rejects_seed_out_of_range() {
    let mut draft = SeedDraft::new();
    assert_eq!(draft.set(0, None), Err(BracketError::SeedOutOfRange(0)));
    assert_eq!(draft.set(13, None), Err(BracketError::SeedOutOfRange(13)));
}

#[test]
fn seed_assignment_deserializes_only_when_valid() {
    let teams = ranked_teams(12);
    let good = serde_json::to_string(&SeedDraft::from_ranked(&teams)).unwrap();
    let parsed: SeedAssignment = serde_json::from_str(&good).unwrap();
    assert_eq!(parsed.team(3), Some(teams[2].id));

    let mut dup = SeedDraft::from_ranked(&teams);
    dup.seeds[5] = dup.seeds[6];
    let bad = serde_json::to_string(&dup).unwrap();
    assert!(serde_json::from_str::<SeedAssignment>(&bad).is_err());
}

#[test]
fn pool_orders_by_ranking_and_drops_ineligible() {
    let mut benched = Team::ranked("Benched", 1);
    benched.eligible = false;
    let teams = vec![
        Team::new("Zulu"),
        Team::ranked("Third", 3),
        benched,
        Team::new("Alpha"),
        Team::ranked("First", 1),
    ];
    let names: Vec<_> = resolve_team_pool(teams).into_iter().map(|t| t.name).collect();
    assert_eq!(names, vec!["First", "Third", "Alpha", "Zulu"]);
}

#[test]
fn csv_import_reads_optional_columns() {
    let data = "name,ranking,eligible\nHawks,2,true\nOwls,,\nBears,1,false\n";
    let teams = read_teams_csv(data.as_bytes()).unwrap();
    assert_eq!(teams.len(), 3);
    assert_eq!(teams[0].name, "Hawks");
    assert_eq!(teams[0].ranking, Some(2));
    assert_eq!(teams[1].ranking, None);
    assert!(teams[1].eligible);
    assert!(!teams[2].eligible);
}

#[test]
fn csv_import_rejects_bad_ranking() {
    let data = "name,ranking,eligible\nHawks,second,true\n";
    assert!(matches!(
        read_teams_csv(data.as_bytes()),
        Err(BracketError::TeamImport(_))
    ));
}
