use soul_game::{
    Attribute, CombatStats, KillEvent, Milestone, NodeStatus, Phase, ProgressionState, Recipient,
    SoulConfig, SoulContext, StatBonuses, TalentCatalog, WorldFlags, cumulative_xp, on_kill,
    on_kill_nearby, render, required_xp, talent_tree,
};

fn ctx() -> SoulContext {
    SoulContext::new(SoulConfig::load_from_static())
}

fn load_catalog() -> TalentCatalog {
    TalentCatalog::from_json(include_str!("../assets/talents.json")).unwrap()
}

fn mob(max_hp: i32, defense: i32, damage: i32) -> KillEvent {
    KillEvent {
        stats: CombatStats::new(max_hp, defense, damage),
        is_boss: false,
    }
}

#[test]
fn bundled_config_matches_defaults() {
    assert_eq!(SoulConfig::load_from_static(), SoulConfig::default());
    SoulConfig::load_from_static().validate().unwrap();
}

#[test]
fn two_thousand_xp_from_level_one() {
    let ctx = ctx();
    let mut state = ProgressionState::new();
    let ups = state.add_xp(2_000, &ctx, &WorldFlags::default());
    let levels: Vec<u32> = ups.iter().map(|up| up.level).collect();
    assert_eq!(levels, vec![2, 3, 4]);
    assert_eq!(state.level, 4);
    assert_eq!(state.experience, 399);
    assert_eq!(state.basic_points, 3);
    assert_eq!(state.talent_points, 0);
}

#[test]
fn cumulative_award_lands_exactly_on_target_level() {
    let ctx = ctx();
    let world = WorldFlags::through(Phase::PreHardmodeEarly);
    for target in 2..=20 {
        let mut state = ProgressionState::new();
        let total = cumulative_xp(1, target, ctx.config());
        state.add_xp(i64::try_from(total).unwrap(), &ctx, &world);
        assert_eq!(state.level, target, "target {target}");
        assert_eq!(state.experience, 0, "target {target}");
        assert_eq!(state.basic_points, target - 1);
        assert_eq!(state.talent_points, target / 5);
    }
}

#[test]
fn split_awards_match_a_single_award() {
    let ctx = ctx();
    let world = WorldFlags::through(Phase::Hardmode);
    let mut lump = ProgressionState::new();
    lump.add_xp(50_000, &ctx, &world);

    let mut drip = ProgressionState::new();
    for _ in 0..500 {
        drip.add_xp(100, &ctx, &world);
    }
    assert_eq!(lump, drip);
}

#[test]
fn kill_loop_banks_at_cap_and_releases_after_boss() {
    let ctx = ctx();
    let mut world = WorldFlags::default();
    let mut state = ProgressionState::new();
    let kill = mob(1_000, 20, 50);

    for _ in 0..200 {
        on_kill(&kill, [&mut state], &ctx, &world);
    }
    assert_eq!(state.level, 10);
    assert_eq!(state.experience, 200 * 90 - cumulative_xp(1, 10, ctx.config()));
    assert_eq!(state.experience, 3_836);
    assert_eq!(state.talent_points, 2);
    assert!(state.is_capped(&world));

    let boss = KillEvent {
        is_boss: true,
        ..mob(28_000, 14, 40)
    };
    let outcome = on_kill(&boss, [&mut state], &ctx, &world);
    assert_eq!(outcome.xp_awarded, 0);
    world.set(Milestone::FirstBoss, true);

    let outcome = on_kill(&kill, [&mut state], &ctx, &world);
    assert_eq!(outcome.total_level_ups(), 1);
    assert_eq!(state.level, 11);
    assert_eq!(state.experience, 3_836 + 90 - required_xp(11, ctx.config()));
    assert_eq!(state.experience, 278);
}

#[test]
fn party_kills_only_reach_players_in_range() {
    let ctx = ctx();
    let world = WorldFlags::default();
    let mut leader = ProgressionState::new();
    let mut straggler = ProgressionState::new();
    let kill = mob(250, 10, 25);

    let outcome = on_kill_nearby(
        &kill,
        [
            (Recipient::nearby(ctx.config().xp_share_range), &mut leader),
            (Recipient::nearby(ctx.config().xp_share_range + 1.0), &mut straggler),
        ],
        &ctx,
        &world,
    );
    assert_eq!(outcome.recipients, 1);
    assert_eq!(leader.experience, 10);
    assert_eq!(straggler.experience, 0);
}

#[test]
fn talent_path_follows_gates() {
    let ctx = ctx();
    let catalog = load_catalog();
    let mut world = WorldFlags::default();
    let mut state = ProgressionState::new();
    state.add_xp(
        i64::try_from(cumulative_xp(1, 10, ctx.config())).unwrap(),
        &ctx,
        &world,
    );
    assert_eq!(state.talent_points, 2);

    assert!(!state.unlock_talent(&catalog, "keen_edge", &world, &ctx));
    assert!(state.unlock_talent(&catalog, "soul_core", &world, &ctx));
    assert!(state.unlock_talent(&catalog, "keen_edge", &world, &ctx));
    assert_eq!(state.talent_points, 0);
    assert!(!state.unlock_talent(&catalog, "steady_aim", &world, &ctx));

    state.add_talent_points(5);
    let second_wind = catalog.get("second_wind").unwrap();
    assert_eq!(
        state.talent_status(second_wind, Phase::Start),
        NodeStatus::LockedPoints
    );
    world.set(Milestone::FirstBoss, true);
    state.add_xp(
        i64::try_from(cumulative_xp(10, 20, ctx.config())).unwrap(),
        &ctx,
        &world,
    );
    assert_eq!(state.level, 20);
    assert!(state.unlock_talent(&catalog, "second_wind", &world, &ctx));
    assert_eq!(state.talent_points, 5 + 2 - 2);

    let resonant = catalog.get("resonant_soul").unwrap();
    assert_eq!(
        state.talent_status(resonant, Phase::PreHardmodeEarly),
        NodeStatus::LockedPoints
    );

    let tree = talent_tree(&state, &catalog, &world);
    let active: Vec<&str> = tree
        .iter()
        .filter(|view| view.status == NodeStatus::Active)
        .map(|view| view.id.as_str())
        .collect();
    assert_eq!(active, vec!["soul_core", "keen_edge", "second_wind"]);
}

#[test]
fn allocation_feeds_tick_bonuses_and_hud() {
    let ctx = ctx();
    let world = WorldFlags::default();
    let mut state = ProgressionState::new();
    state.add_basic_points(12);
    while state.allocate(Attribute::Damage, &ctx) {}
    assert_eq!(state.damage_rank, 11);
    assert_eq!(state.basic_points, 0);

    let bonuses: StatBonuses = state.on_tick();
    assert!((bonuses.damage - 0.055).abs() < 1e-6);

    let hud = render(&state, &world, &ctx);
    assert_eq!(hud.attributes[0].rank, 11);
    assert_eq!(hud.attributes[0].next_cost, 2);
    assert!(!hud.attributes[0].affordable);
}

#[test]
fn reloaded_player_above_cap_keeps_level() {
    let ctx = ctx();
    let world = WorldFlags::default();
    let veteran = ProgressionState {
        level: 35,
        experience: 10,
        ..ProgressionState::default()
    };
    let mut loaded = ProgressionState::new();
    loaded.on_load(&veteran.on_save(), &ctx);
    assert_eq!(loaded.level, 35);

    let ups = loaded.add_xp(1_000_000, &ctx, &world);
    assert!(ups.is_empty());
    assert_eq!(loaded.level, 35);
    assert_eq!(loaded.experience, 1_000_010);
}
