use tabled::Tabled;

use crate::cli::RepoArgs;
use crate::client::Session;
use crate::config::Config;
use crate::discussions::categories;
use crate::error::Result;
use crate::output::{self, is_json_output};
use crate::types::DiscussionCategory;

use super::Target;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "ID")]
    id: String,
}

impl From<&DiscussionCategory> for CategoryRow {
    fn from(category: &DiscussionCategory) -> Self {
        Self {
            name: category.name.clone(),
            id: category.id.clone(),
        }
    }
}

pub async fn list(session: &Session<'_>, config: &Config, repo: RepoArgs) -> Result<()> {
    let target = Target::repository_or_org(config, &repo)?;
    let page = categories::list(session, &target.owner, &target.repo).await?;

    if page.categories.is_empty() && !is_json_output() {
        return output::print_message(&format!(
            "No discussion categories in {}/{}",
            target.owner, target.repo
        ));
    }

    output::print_page(
        &page,
        &page.categories,
        &page.page_info,
        |c| CategoryRow::from(c),
        |c| c.name.clone(),
    )
}
