fn main() {
    prioq::app::startup::startup();
}
