use access_sdk::AccessKey;
use clap::Parser;

#[derive(Parser, Debug, Clone)]
pub struct Keygen {}

impl Keygen {
    pub fn run(self) {
        let key = AccessKey::generate();
        println!("address: {}", key.address());
        println!("secret:  {}", key.secret_hex());
    }
}
