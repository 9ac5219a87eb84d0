use clap::Subcommand;

#[derive(Subcommand)]
pub enum TemplateAction {
    /// List saved work-plan templates
    List,
    /// Show a template
    Show {
        template_id: String,
    },
}

pub fn run(action: TemplateAction) -> Result<(), Box<dyn std::error::Error>> {
    let client = super::client()?;
    let rt = super::runtime()?;

    match action {
        TemplateAction::List => {
            let templates = rt.block_on(client.list_templates())?;
            println!("{}", serde_json::to_string_pretty(&templates)?);
        }
        TemplateAction::Show { template_id } => {
            let template = rt.block_on(client.get_template(&template_id))?;
            println!("{}", serde_json::to_string_pretty(&template)?);
        }
    }
    Ok(())
}
