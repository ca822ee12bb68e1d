use crate::actions::Action;
use crate::scheduler::TimerId;

#[derive(Debug, Clone)]
pub enum Event {
    Key(crossterm::event::KeyEvent),
    Resize { cols: u16, rows: u16 },
    TimerFired { id: TimerId },
    Action(Action),
    StartClock,
    StopClock,
    Quit,
}
