use nu_plugin::{EngineInterface, EvaluatedCall, PluginCommand};
use nu_protocol::{Category, Example, LabeledError, PipelineData, Signature, Type};

use super::util::{filter_flags, filter_from_call, input_rows, labeled, output};
use crate::ops;
use crate::SentimentPlugin;

pub struct Dashboard;

impl PluginCommand for Dashboard {
    type Plugin = SentimentPlugin;

    fn name(&self) -> &str {
        "sentiment dashboard"
    }

    fn description(&self) -> &str {
        "Every aggregate for one dashboard view: summary, trend, categories, n-grams and word cloud"
    }

    fn signature(&self) -> Signature {
        filter_flags(Signature::build(self.name()))
            .input_output_type(Type::table(), Type::record())
            .category(Category::Experimental)
    }

    fn search_terms(&self) -> Vec<&str> {
        vec!["dashboard", "sentiment", "report", "overview"]
    }

    fn examples(&self) -> Vec<Example<'_>> {
        vec![
            Example {
                example: "open comments.json | sentiment dashboard",
                description: "All aggregates over every row",
                result: None,
            },
            Example {
                example: "open comments.json | sentiment dashboard --type comment --page Business_Crypto --sentiment negative",
                description: "Negative tab for crypto comments",
                result: None,
            },
        ]
    }

    fn run(
        &self,
        plugin: &SentimentPlugin,
        _engine: &EngineInterface,
        call: &EvaluatedCall,
        input: PipelineData,
    ) -> Result<PipelineData, LabeledError> {
        let head = call.head;
        let filter = filter_from_call(call)?;
        let rows = input_rows(input);
        let result = ops::op_dashboard(&rows, &filter, &plugin.stopwords, &plugin.config)
            .map_err(|e| labeled(e, head))?;
        Ok(output(&result, head))
    }
}
