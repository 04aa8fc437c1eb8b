use nu_plugin::{EngineInterface, EvaluatedCall, PluginCommand};
use nu_protocol::{Category, Example, LabeledError, PipelineData, Signature, Type};

use super::util::{filter_flags, filter_from_call, input_rows, output};
use crate::ops;
use crate::SentimentPlugin;

pub struct Categories;

impl PluginCommand for Categories {
    type Plugin = SentimentPlugin;

    fn name(&self) -> &str {
        "sentiment categories"
    }

    fn description(&self) -> &str {
        "Cross-tabulate comments by category and sentiment"
    }

    fn signature(&self) -> Signature {
        filter_flags(Signature::build(self.name()))
            .input_output_type(Type::table(), Type::record())
            .category(Category::Experimental)
    }

    fn search_terms(&self) -> Vec<&str> {
        vec!["category", "crosstab", "pivot", "comments"]
    }

    fn examples(&self) -> Vec<Example<'_>> {
        vec![Example {
            example: "open comments.json | sentiment categories",
            description: "Positive and negative comment counts per category",
            result: None,
        }]
    }

    fn run(
        &self,
        _plugin: &SentimentPlugin,
        _engine: &EngineInterface,
        call: &EvaluatedCall,
        input: PipelineData,
    ) -> Result<PipelineData, LabeledError> {
        let filter = filter_from_call(call)?;
        let rows = input_rows(input);
        Ok(output(&ops::op_categories(&rows, &filter), call.head))
    }
}
