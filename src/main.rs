fn main() -> anyhow::Result<()> {
    orbit_scene::run()
}
