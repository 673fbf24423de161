use clap::Parser;

use crate::common::Connection;

#[derive(Parser, Debug, Clone)]
pub struct Login {
    #[command(flatten)]
    pub connection: Connection,
}

impl Login {
    pub async fn run(self) -> anyhow::Result<()> {
        let sdk = self.connection.connect().await?;
        println!("{}", sdk.jwt_token);
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct Article {
    #[command(flatten)]
    pub connection: Connection,
}

impl Article {
    pub async fn run(self) -> anyhow::Result<()> {
        let sdk = self.connection.connect().await?;
        println!("{}", sdk.article().await?);
        Ok(())
    }
}
