use clap::Args;

use crate::{
    pkg::internal::jobsearch::{
        JobSearchClient, SearchJobs,
        spec::{JobSource, SearchParams},
    },
    prelude::Result,
};

#[derive(Args)]
pub struct SearchArgs {
    #[arg(long)]
    pub term: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub occupation: Option<String>,
    #[arg(long)]
    pub source: Option<JobSource>,
}

pub async fn run(args: SearchArgs) -> Result<()> {
    let params = SearchParams {
        search_term: args.term,
        location: args.location,
        occupation: args.occupation,
        source: args.source,
    };
    let client = JobSearchClient::from_settings()?;
    let outcome = client.search_jobs(&params).await?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
