//! Demo workspace used by the CLI and integration tests.
//!
//! Metadata on seeded blocks is set explicitly, so some blocks carry tags
//! or priorities that their content does not mention.

use crate::model::block::{Block, BlockKind, DueDate, Priority};
use crate::model::criteria::{DateClass, QueryCriteria, SavedSearch, SearchQuery};
use crate::model::project::{Project, ProjectColor, ProjectKind, Section};
use crate::model::store::BlockStore;
use crate::repo::block_repo::InMemoryBlockRepository;
use crate::repo::project_repo::InMemoryProjectRepository;
use crate::service::query_service::TODAY_COLLECTION_ID;

/// Id of the seeded query block in the `work` collection.
pub const DEMO_QUERY_BLOCK_ID: &str = "work-query";

/// Complete demo state: block store plus sidebar model.
#[derive(Debug, Clone)]
pub struct DemoWorkspace {
    pub store: BlockStore,
    pub projects: Vec<Project>,
    pub sections: Vec<Section>,
    pub saved_searches: Vec<SavedSearch>,
}

impl DemoWorkspace {
    /// Splits the workspace into in-memory repositories.
    pub fn into_repositories(self) -> (InMemoryBlockRepository, InMemoryProjectRepository) {
        (
            InMemoryBlockRepository::new(self.store),
            InMemoryProjectRepository::new(self.projects, self.sections, self.saved_searches),
        )
    }
}

pub fn demo_workspace() -> DemoWorkspace {
    DemoWorkspace {
        store: demo_store(),
        projects: demo_projects(),
        sections: vec![
            section("main-projects", "Projects", ProjectColor::Blue),
            section("home-section", "Home", ProjectColor::Red),
        ],
        saved_searches: demo_saved_searches(),
    }
}

fn demo_store() -> BlockStore {
    let work_query = Block::with_id(
        DEMO_QUERY_BLOCK_ID,
        BlockKind::Query {
            query: QueryCriteria {
                tags: vec!["work".to_string()],
                ..QueryCriteria::default()
            },
            bg_color: None,
            show_title: true,
        },
        "Everything tagged work",
    );

    BlockStore::new()
        .with_collection(
            "inbox",
            vec![
                task("block1", "Run a mile", Priority::None, None, &[]),
                task("block2", "Buy a house", Priority::None, None, &[]),
                task(
                    "block3",
                    "Buy one more !p1 ^tomorrow",
                    Priority::P1,
                    Some(DueDate::Tomorrow),
                    &[],
                ),
                task(
                    "block4",
                    "Testing !p1 ^today",
                    Priority::P1,
                    Some(DueDate::Today),
                    &[],
                ),
            ],
        )
        .with_collection(
            "work",
            vec![
                tagged(
                    Block::with_id("work1", BlockKind::Text, "Work project notes"),
                    &["work"],
                ),
                task(
                    "work-task1",
                    "Finish project proposal ^today",
                    Priority::None,
                    Some(DueDate::Today),
                    &["work"],
                ),
                work_query,
            ],
        )
        .with_collection(
            "personal",
            vec![task(
                "personal-task1",
                "Call mom ^today",
                Priority::None,
                Some(DueDate::Today),
                &["personal"],
            )],
        )
        .with_collection("home-improvement", Vec::new())
        .with_collection("kitchen-remodel", Vec::new())
        .with_collection(
            "fitness-goals",
            vec![task(
                "fitness-task1",
                "Go for a jog ^today !p2",
                Priority::P2,
                Some(DueDate::Today),
                &["fitness"],
            )],
        )
        .with_collection("learning", Vec::new())
        .with_collection("finance", Vec::new())
        .with_collection("side-projects", Vec::new())
        .with_collection("home", Vec::new())
        .with_collection(
            TODAY_COLLECTION_ID,
            vec![
                Block::with_id("today-note1", BlockKind::Text, "Planning for today"),
                task(
                    "today-task1",
                    "Call dentist for appointment",
                    Priority::P1,
                    None,
                    &["health"],
                ),
            ],
        )
}

fn demo_projects() -> Vec<Project> {
    let mut inbox = Project::new("inbox", "Inbox", ProjectKind::Pinned);
    inbox.icon = Some("inbox".to_string());
    let mut today = Project::new("today", "Today", ProjectKind::Pinned);
    today.icon = Some("calendar".to_string());

    let mut home_improvement = project(
        "home-improvement",
        "Home Improvement",
        ProjectColor::Blue,
        "main-projects",
    );
    let mut kitchen = Project::new("kitchen-remodel", "Kitchen Remodel", ProjectKind::Subproject);
    kitchen.color = Some(ProjectColor::Blue);
    home_improvement.subprojects.push(kitchen);

    vec![
        inbox,
        today,
        project("work", "Work", ProjectColor::Red, "main-projects"),
        project("personal", "Personal", ProjectColor::Blue, "main-projects"),
        home_improvement,
        project("fitness-goals", "Fitness Goals", ProjectColor::Green, "main-projects"),
        project("learning", "Learning", ProjectColor::Purple, "main-projects"),
        project("finance", "Finance", ProjectColor::Teal, "main-projects"),
        project("side-projects", "Side Projects", ProjectColor::Indigo, "main-projects"),
        project("home", "Home", ProjectColor::Red, "home-section"),
    ]
}

fn demo_saved_searches() -> Vec<SavedSearch> {
    vec![
        SavedSearch {
            id: "high-priority".to_string(),
            name: "High Priority".to_string(),
            color: ProjectColor::Purple,
            query: SearchQuery {
                priority: Some(Priority::P1),
                ..SearchQuery::default()
            },
        },
        SavedSearch {
            id: "health-tasks".to_string(),
            name: "Health Tasks".to_string(),
            color: ProjectColor::Orange,
            query: SearchQuery {
                tags: vec!["health".to_string()],
                ..SearchQuery::default()
            },
        },
        SavedSearch {
            id: "today-tasks".to_string(),
            name: "Today Tasks".to_string(),
            color: ProjectColor::Blue,
            query: SearchQuery {
                date: Some(DateClass::Today),
                ..SearchQuery::default()
            },
        },
    ]
}

fn task(
    id: &str,
    content: &str,
    priority: Priority,
    date: Option<DueDate>,
    tags: &[&str],
) -> Block {
    let mut block = Block::with_id(id, BlockKind::Task { checked: false }, content);
    block.priority = priority;
    block.date = date;
    tagged(block, tags)
}

fn tagged(mut block: Block, tags: &[&str]) -> Block {
    block.tags = tags.iter().map(|tag| tag.to_string()).collect();
    block
}

fn project(id: &str, name: &str, color: ProjectColor, section_id: &str) -> Project {
    let mut project = Project::new(id, name, ProjectKind::Project);
    project.color = Some(color);
    project.section_id = Some(section_id.to_string());
    project
}

fn section(id: &str, name: &str, color: ProjectColor) -> Section {
    Section {
        id: id.to_string(),
        name: name.to_string(),
        color,
        collapsed: false,
    }
}
