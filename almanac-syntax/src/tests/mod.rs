mod parser;
mod record;
