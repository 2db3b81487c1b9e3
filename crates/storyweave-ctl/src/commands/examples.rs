//! `storyweave-ctl examples`

use storyweave_shared::models::api::EXAMPLE_PROMPTS;

use crate::output;

pub(crate) fn handle_examples_command() {
    output::header("Example prompts");
    for (index, prompt) in EXAMPLE_PROMPTS.iter().enumerate() {
        output::item(index + 1, prompt);
    }
    output::blank();
    output::hint("Try: storyweave-ctl generate --prompt \"A BMI calculator\"");
}
