fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracklist::runtime::run()
}
