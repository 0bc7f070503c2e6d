mod command;
mod schema;
mod table;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
