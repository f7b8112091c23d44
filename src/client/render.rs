//! HTML rendering for the task page.

use super::{api::TaskApi, board::TaskBoard};
use minijinja::{Environment, context};

const BOARD_TEMPLATE_NAME: &str = "board.html";
const BOARD_TEMPLATE: &str = include_str!("../../templates/board.html");

/// Renders a [`TaskBoard`] to a full HTML page.
///
/// The template name ends in `.html`, so values are HTML-escaped.
#[derive(Debug)]
pub struct BoardRenderer {
    environment: Environment<'static>,
}

impl BoardRenderer {
    /// Loads the page template.
    ///
    /// # Errors
    ///
    /// Returns [`minijinja::Error`] when the template fails to parse.
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut environment = Environment::new();
        environment.add_template(BOARD_TEMPLATE_NAME, BOARD_TEMPLATE)?;
        Ok(Self { environment })
    }

    /// Renders `board`.
    ///
    /// # Errors
    ///
    /// Returns [`minijinja::Error`] when rendering fails.
    pub fn render<A: TaskApi>(&self, board: &TaskBoard<A>) -> Result<String, minijinja::Error> {
        let template = self.environment.get_template(BOARD_TEMPLATE_NAME)?;
        let draft = board.draft();
        template.render(context! {
            tasks => board.tasks(),
            error => board.error(),
            form_error => board.form_error(),
            draft_title => &draft.title,
            draft_description => draft.description.as_deref().unwrap_or_default(),
        })
    }
}
