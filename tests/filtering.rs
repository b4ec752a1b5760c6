use story_tree::{
    cli, meta, AllowAll, Configuration, DescriptionGenerator, Filter,
    FilteredStory, Meta, MetaExpression, Scenario, StepCandidate,
    StoryControls, Story,
};

fn candidates() -> Vec<StepCandidate> {
    vec![
        StepCandidate::given("a $thing").unwrap(),
        StepCandidate::then("it works").unwrap(),
    ]
}

fn story() -> Story {
    Story::new("Checkout")
        .with_meta(Meta::parse("@area billing @owner team"))
        .with_scenario(Scenario::new("regular").with_steps(["Given a cart"]))
        .with_scenario(
            Scenario::new("quick")
                .with_meta(Meta::parse("@smoke"))
                .with_steps(["Given a cart", "Then it works"]),
        )
        .with_scenario(
            Scenario::new("other team")
                .with_meta(Meta::parse("@owner others"))
                .with_steps(["Then it works"]),
        )
}

fn scenario_labels(story: &story_tree::Description) -> Vec<&str> {
    story.children().iter().map(|s| s.label()).collect()
}

#[test]
fn scenarios_inherit_story_meta() {
    let story = story();
    let controls = StoryControls::default();
    let story_meta = meta::story_meta(&story, &controls);

    let regular = meta::scenario_meta(&story_meta, &story.scenarios[0], &controls);
    let other = meta::scenario_meta(&story_meta, &story.scenarios[2], &controls);

    assert_eq!(regular.value("area"), Some("billing"));
    assert_eq!(regular.value("owner"), Some("team"));
    assert_eq!(other.value("owner"), Some("others"));
    assert_eq!(other.value("area"), Some("billing"));
}

#[test]
fn story_is_kept_for_its_allowed_scenarios() {
    let cands = candidates();
    let config = Configuration::default();
    let filter: MetaExpression = "+smoke".parse().unwrap();
    let generator = DescriptionGenerator::new(&cands, &config, &filter);
    let stories = [story()];

    let filtered = FilteredStory::new(&filter, &stories[0], &config.story_controls);
    let suite = generator.build_all(&stories);

    assert!(!filtered.allowed());
    assert!(filtered.included());
    let described = suite.stories().collect::<Vec<_>>();
    assert_eq!(described.len(), 1);
    assert_eq!(scenario_labels(described[0]), ["Scenario: quick"]);
    assert_eq!(suite.leaf_count, 2 + 2);
}

#[test]
fn overridden_meta_is_filtered_by_its_own_value() {
    let cands = candidates();
    let config = Configuration::default();
    let filter: MetaExpression = "-owner team".parse().unwrap();
    let generator = DescriptionGenerator::new(&cands, &config, &filter);

    let build = generator.build(&story());

    assert_eq!(scenario_labels(&build.description), ["Scenario: other team"]);
}

#[test]
fn wildcard_values_match() {
    let cands = candidates();
    let config = Configuration::default();
    let filter: MetaExpression = "+owner oth*".parse().unwrap();
    let generator = DescriptionGenerator::new(&cands, &config, &filter);

    let build = generator.build(&story());

    assert_eq!(scenario_labels(&build.description), ["Scenario: other team"]);
}

#[test]
fn excluded_everywhere_skips_the_story() {
    let cands = candidates();
    let config = Configuration::default();
    let filter: MetaExpression = "-area".parse().unwrap();
    let generator = DescriptionGenerator::new(&cands, &config, &filter);

    let suite = generator.build_all([&story()]);

    assert_eq!(suite.skipped, ["Checkout"]);
    assert_eq!(suite.stories().count(), 0);
    assert_eq!(suite.leaf_count, 2);
    assert_eq!(suite.description.to_string(), "Stories\n  BeforeStories\n  AfterStories\n");
}

#[test]
fn story_self_meta_is_filterable_with_prefix() {
    let cands = candidates();
    let config = Configuration::default().with_story_controls(
        StoryControls::default()
            .with_story_meta_prefix("story_")
            .with_scenario_meta_prefix("scenario_"),
    );
    let filter: MetaExpression = "+scenario_title quick".parse().unwrap();
    let generator = DescriptionGenerator::new(&cands, &config, &filter);

    let build = generator.build(&story());

    assert_eq!(scenario_labels(&build.description), ["Scenario: quick"]);
}

#[test]
fn tag_expression_from_cli() {
    use clap::Parser as _;

    #[derive(clap::Parser)]
    struct Cli {
        #[command(flatten)]
        stories: cli::Opts,
    }

    let cli = Cli::parse_from(["runner", "--tags", "@smoke or @area"]);
    let filter = cli.stories.filter();
    let config = cli.stories.configuration(Configuration::default());
    let cands = candidates();
    let generator = DescriptionGenerator::new(&cands, &config, &filter);

    let build = generator.build(&story());

    assert!(matches!(filter, Filter::Tags(_)));
    assert_eq!(build.description.children().len(), 3);
}

#[test]
fn closures_are_filters() {
    let cands = candidates();
    let config = Configuration::default();
    let only_quick = |m: &Meta| m.value("title") == Some("quick");
    let generator = DescriptionGenerator::new(&cands, &config, &only_quick);

    let build = generator.build(&story());
    let everything = DescriptionGenerator::new(&cands, &config, &AllowAll).build(&story());

    assert_eq!(scenario_labels(&build.description), ["Scenario: quick"]);
    assert_eq!(everything.description.children().len(), 3);
}
