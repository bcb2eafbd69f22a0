pub mod reception_dto;

pub use reception_dto::{
    CategoryResponseDto, CounterResponseDto, IssueTicketDto, IssuedTicketDto, QueueEntryDto,
    QueueStatsDto, TicketResponseDto, TicketSlipDto,
};
