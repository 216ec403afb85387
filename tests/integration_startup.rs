//! Integration test to ensure a full generate-spawn-simulate run works end to end.

use delve::{
    factories, AgentConfig, CaveGenerator, DelveResult, DungeonMap, GenerationConfig, Generator,
    MazeGenerator, Position, World,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::io::Write;

fn populated_world(seed: u64) -> DelveResult<World> {
    let config = GenerationConfig::new(seed);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let map = CaveGenerator::new().generate(&config, &mut rng)?;

    let mut open = map.walkable_positions();
    open.shuffle(&mut rng);

    let mut world = World::new(map, AgentConfig::default(), seed);
    let agents = [
        factories::player(),
        factories::orc(),
        factories::troll(),
        factories::caster(),
        factories::goblin(),
        factories::table(),
        factories::dummy(),
    ];
    for agent in agents {
        let pos = open.pop().expect("maze has room for every agent");
        world.spawn(agent.at(pos))?;
    }
    for _ in 0..3 {
        let pos = open.pop().expect("maze has room for loot");
        world.drop_item(factories::dagger(pos))?;
    }
    Ok(world)
}

#[test]
fn test_basic_startup() -> DelveResult<()> {
    let mut world = populated_world(12345)?;
    assert!(world.target().is_some());
    assert_eq!(world.turn_number, 0);

    for _ in 0..25 {
        world.tick()?;
    }

    assert_eq!(world.turn_number, 25);
    assert!(world.target().unwrap().is_alive());
    for agent in world.agents() {
        assert!(world.map.is_walkable(agent.position), "{} left the floor", agent.name);
    }
    Ok(())
}

#[test]
fn test_same_seed_same_run() -> DelveResult<()> {
    let mut first = populated_world(99)?;
    let mut second = populated_world(99)?;
    for _ in 0..15 {
        first.tick()?;
        second.tick()?;
    }

    let positions = |world: &World| world.agents().iter().map(|a| a.position).collect::<Vec<Position>>();
    assert_eq!(positions(&first), positions(&second));
    assert_eq!(
        first.messages.iter().collect::<Vec<_>>(),
        second.messages.iter().collect::<Vec<_>>()
    );
    Ok(())
}

#[test]
fn test_generation_config_from_file() -> DelveResult<()> {
    let mut config = GenerationConfig::for_testing(5);
    config.width = 15;
    config.height = 9;

    let mut file = tempfile::NamedTempFile::new()?;
    write!(file, "{}", serde_json::to_string(&config)?)?;

    let loaded = GenerationConfig::from_json_file(file.path())?;
    assert_eq!(loaded, config);

    let maze = MazeGenerator::new().generate(&loaded, &mut StdRng::seed_from_u64(loaded.seed))?;
    assert_eq!((maze.width(), maze.height()), (15, 9));
    assert!(DungeonMap::from_maze(&maze).walkable_positions().len() > 1);
    Ok(())
}
