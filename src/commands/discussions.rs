use colored::Colorize;
use tabled::Tabled;

use crate::cli::{CreateArgs, ListArgs, RepoArgs, UpdateArgs};
use crate::client::Session;
use crate::config::Config;
use crate::discussions::{self, CreateDiscussion, ListDiscussions, UpdateDiscussion};
use crate::error::Result;
use crate::output::{self, format_date, format_relative, is_json_output, state_colored, truncate};
use crate::pagination::PageRequest;
use crate::types::{Discussion, MutationIdentity};

use super::Target;

#[derive(Tabled)]
struct DiscussionRow {
    #[tabled(rename = "#")]
    number: u64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

impl From<&Discussion> for DiscussionRow {
    fn from(d: &Discussion) -> Self {
        Self {
            number: d.number,
            title: truncate(&d.title, 50),
            category: d.category.name.clone(),
            author: d.author.clone().unwrap_or_else(|| "ghost".to_string()),
            state: state_colored(d.closed, d.is_answered),
            updated: format_relative(&d.updated_at),
        }
    }
}

fn compact_line(d: &Discussion) -> String {
    format!("#{}\t{}\t{}", d.number, d.category.name, d.title)
}

pub async fn list(session: &Session<'_>, config: &Config, args: ListArgs) -> Result<()> {
    let target = Target::repository_or_org(config, &args.repo)?;
    let request = ListDiscussions {
        owner: target.owner,
        repo: target.repo,
        category: args.category.selector(),
        order_by: args.order_by,
        direction: args.direction,
        page: PageRequest::from(&args.page),
    };

    let page = discussions::list(session, &request).await?;

    if page.discussions.is_empty() && !is_json_output() {
        return output::print_message(&format!(
            "No discussions found in {}/{}",
            request.owner, request.repo
        ));
    }

    output::print_page(
        &page,
        &page.discussions,
        &page.page_info,
        |d| DiscussionRow::from(d),
        compact_line,
    )
}

pub async fn view(
    session: &Session<'_>,
    config: &Config,
    repo: RepoArgs,
    number: u64,
) -> Result<()> {
    let target = Target::repository(config, &repo)?;
    let discussion = discussions::get(session, &target.owner, &target.repo, number).await?;

    output::print_item(&discussion, |d| {
        println!("{} {}", format!("#{}", d.number).bold(), d.title.bold());
        println!("{}", d.url.bright_black());
        println!();
        println!("Category: {}", d.category.name);
        println!("Author:   {}", d.author.as_deref().unwrap_or("ghost"));
        println!("State:    {}", state_colored(d.closed, d.is_answered));
        println!("Created:  {}", format_date(&d.created_at));
        println!("Updated:  {}", format_date(&d.updated_at));
        if let Some(answered) = &d.answer_chosen_at {
            println!("Answered: {}", format_date(answered));
        }
        if let Some(body) = d.body.as_deref().filter(|b| !b.is_empty()) {
            println!();
            println!("{body}");
        }
    })
}

fn print_mutation(verb: &str, identity: &MutationIdentity) -> Result<()> {
    if is_json_output() {
        return output::print_item(identity, |_| {});
    }
    let label = identity
        .number
        .map(|n| format!("discussion #{n}"))
        .unwrap_or_else(|| identity.id.clone());
    output::print_message(&format!("{verb} {label}: {}", identity.url))
}

pub async fn create(session: &Session<'_>, config: &Config, args: CreateArgs) -> Result<()> {
    let target = Target::repository(config, &args.repo)?;
    let request = CreateDiscussion {
        owner: target.owner,
        repo: target.repo,
        title: args.title,
        body: args.body,
        category: args.category.selector(),
    };

    let identity = discussions::create(session, &request).await?;
    print_mutation("Created", &identity)
}

pub async fn update(session: &Session<'_>, config: &Config, args: UpdateArgs) -> Result<()> {
    let target = Target::repository(config, &args.repo)?;
    let request = UpdateDiscussion {
        owner: target.owner,
        repo: target.repo,
        number: args.number,
        title: args.title,
        body: args.body,
        category: args.category.selector(),
    };

    let identity = discussions::update(session, &request).await?;
    print_mutation("Updated", &identity)
}
